//! Lazy streams whose tails are computed on demand.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use recsum::{index::U1, InvalidVariantAccess, Sum};

struct Nil;

struct Cons<T> {
    h: T,
    t: Rc<dyn Fn() -> Stream<T>>,
}

type Stream<T> = Sum![Nil, box Cons<T>];

fn take<T: Clone>(n: usize, s: &Stream<T>, dst: &mut Vec<T>) {
    if n == 0 {
        return;
    }
    s.matching()
        .case(|_: &Nil| ())
        .case(|c: &Cons<T>| {
            dst.push(c.h.clone());
            take(n - 1, &(c.t)(), dst);
        })
        .finish()
        .unwrap()
}

fn hd<T: Clone>(s: &Stream<T>) -> Result<T, InvalidVariantAccess> {
    s.at::<U1>().map(|c| c.h.clone())
}

fn from(x: u64) -> Stream<u64> {
    Stream::new(Cons {
        h: x,
        t: Rc::new(move || from(x + 1)),
    })
}

fn fib(a: u64, b: u64) -> Stream<u64> {
    Stream::new(Cons {
        h: a,
        t: Rc::new(move || fib(b, a + b)),
    })
}

fn countdown(n: u64) -> Stream<u64> {
    if n == 0 {
        return Stream::new(Nil);
    }
    Stream::new(Cons {
        h: n,
        t: Rc::new(move || countdown(n - 1)),
    })
}

#[test]
fn natural_numbers() {
    let mut s = Vec::new();
    take(10, &from(0), &mut s);
    assert_eq!(s, (0..10).collect::<Vec<_>>());
}

#[test]
fn fibonacci_sequence() {
    let mut s = Vec::new();
    take(10, &fib(0, 1), &mut s);
    assert_eq!(s, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
}

#[test]
fn finite_streams_stop_early() {
    let mut s = Vec::new();
    take(10, &countdown(3), &mut s);
    assert_eq!(s, vec![3, 2, 1]);
}

#[test]
fn head_of_an_empty_stream_fails() {
    assert_eq!(hd(&from(7)), Ok(7));
    assert_eq!(
        hd(&countdown(0)),
        Err(InvalidVariantAccess::WrongIndex {
            requested: 1,
            active: 0
        })
    );
}
