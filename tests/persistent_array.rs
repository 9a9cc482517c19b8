//! Baker's persistent arrays: the newest version owns a plain vector, older
//! versions are chains of diffs pointing at it.

use std::{cell::RefCell, fmt::Display, fmt::Write, mem, rc::Rc};

use pretty_assertions::assert_eq;
use recsum::Sum;

struct Array<T>(Vec<T>);

struct Diff<T> {
    i: usize,
    v: T,
    t: Handle<T>,
}

type Data<T> = Sum![Array<T>, Diff<T>];

type Handle<T> = Rc<RefCell<Data<T>>>;

#[derive(Clone)]
struct PersistentArray<T>(Handle<T>);

impl<T: Clone + Display> PersistentArray<T> {
    fn new(n: usize, value: T) -> Self {
        PersistentArray(Rc::new(RefCell::new(Data::new(Array(vec![value; n])))))
    }

    fn get(&self, i: usize) -> T {
        get(&self.0, i)
    }

    fn set(&self, i: usize, v: T) -> Self {
        let mut data = self.0.borrow_mut();
        match data.get_mut::<Array<T>, _>() {
            Some(Array(a)) => {
                let old = mem::replace(&mut a[i], v);
                let res = Rc::new(RefCell::new(Data::new(Array(mem::take(a)))));
                data.set(Diff {
                    i,
                    v: old,
                    t: res.clone(),
                });
                PersistentArray(res)
            }
            None => PersistentArray(Rc::new(RefCell::new(Data::new(Diff {
                i,
                v,
                t: self.0.clone(),
            })))),
        }
    }

    fn as_string(&self) -> String {
        show(&self.0)
    }
}

fn get<T: Clone>(t: &Handle<T>, i: usize) -> T {
    t.borrow()
        .matching()
        .case(|Array(a): &Array<T>| a[i].clone())
        .case(|d: &Diff<T>| if d.i == i { d.v.clone() } else { get(&d.t, i) })
        .finish()
        .unwrap()
}

fn show<T: Display>(t: &Handle<T>) -> String {
    t.borrow()
        .matching()
        .case(|Array(a): &Array<T>| {
            let mut s = String::from("[| ");
            for x in a {
                write!(s, "{x}; ").unwrap();
            }
            s.push_str("|]");
            s
        })
        .case(|d: &Diff<T>| format!("Diff ({}, {}, {})", d.i, d.v, show(&d.t)))
        .finish()
        .unwrap()
}

#[test]
fn versions_print_as_diff_chains() {
    let a0 = PersistentArray::new(7, 0);
    let a1 = a0.set(1, 7);
    let a2 = a1.set(2, 8);
    let a3 = a1.set(2, 9);

    assert_eq!(
        a0.as_string(),
        "Diff (1, 0, Diff (2, 0, [| 0; 7; 8; 0; 0; 0; 0; |]))"
    );
    assert_eq!(a1.as_string(), "Diff (2, 0, [| 0; 7; 8; 0; 0; 0; 0; |])");
    assert_eq!(a2.as_string(), "[| 0; 7; 8; 0; 0; 0; 0; |]");
    assert_eq!(
        a3.as_string(),
        "Diff (2, 9, Diff (2, 0, [| 0; 7; 8; 0; 0; 0; 0; |]))"
    );
}

#[test]
fn every_version_reads_its_own_values() {
    let a0 = PersistentArray::new(4, 0);
    let a1 = a0.set(1, 7);
    let a2 = a1.set(2, 8);
    let a3 = a1.set(2, 9);

    assert_eq!((a0.get(1), a0.get(2)), (0, 0));
    assert_eq!((a1.get(1), a1.get(2)), (7, 0));
    assert_eq!((a2.get(1), a2.get(2)), (7, 8));
    assert_eq!((a3.get(1), a3.get(2)), (7, 9));
}
