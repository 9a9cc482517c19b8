//! Persistent cons lists, plus how copies and moves of a sum behave.

use std::{cell::Cell, rc::Rc};

use pretty_assertions::assert_eq;
use recsum::{
    index::{U0, U1},
    InvalidVariantAccess, Sum,
};

#[derive(Clone, Debug, PartialEq)]
struct Cons<T> {
    hd: T,
    tl: List<T>,
}

#[derive(Clone, Debug, PartialEq)]
struct Nil;

type List<T> = Sum![box Cons<T>, Nil];

fn nil<T>() -> List<T> {
    List::new(Nil)
}

fn cons<T>(hd: T, tl: List<T>) -> List<T> {
    List::new(Cons { hd, tl })
}

fn from_slice<T: Clone>(items: &[T]) -> List<T> {
    items
        .iter()
        .rev()
        .fold(nil(), |tl, hd| cons(hd.clone(), tl))
}

fn hd<T>(l: &List<T>) -> Option<&T> {
    l.get::<Cons<T>, _>().map(|c| &c.hd)
}

fn tl<T>(l: &List<T>) -> Option<&List<T>> {
    l.get::<Cons<T>, _>().map(|c| &c.tl)
}

fn len<T>(l: &List<T>) -> usize {
    l.matching()
        .case(|_: &Nil| 0)
        .case(|c: &Cons<T>| 1 + len(&c.tl))
        .finish()
        .unwrap()
}

fn reverse<T: Clone>(l: &List<T>) -> List<T> {
    let mut acc = nil();
    let mut cur = l;
    while let Some(c) = cur.get::<Cons<T>, _>() {
        acc = cons(c.hd.clone(), acc);
        cur = &c.tl;
    }
    acc
}

fn to_vec<T: Clone>(l: &List<T>) -> Vec<T> {
    let mut out = Vec::new();
    let mut cur = l;
    while let Some(c) = cur.get::<Cons<T>, _>() {
        out.push(c.hd.clone());
        cur = &c.tl;
    }
    out
}

#[test]
fn head_and_tail() {
    let l = cons(1, nil());
    assert_eq!(hd(&l), Some(&1));
    assert_eq!(tl(&l), Some(&nil()));
    assert_eq!(hd(&nil::<i32>()), None);
    assert_eq!(tl(&nil::<i32>()), None);
}

#[test]
fn reverses() {
    let l = from_slice(&[1, 2, 3, 4]);
    assert_eq!(len(&l), 4);
    assert_eq!(to_vec(&reverse(&l)), vec![4, 3, 2, 1]);
    assert_eq!(to_vec(&l), vec![1, 2, 3, 4]);
    assert_eq!(reverse(&nil::<u8>()), nil());
}

#[test]
fn ordinal_get() {
    let l = cons(1, nil());
    assert_eq!(recsum::get::<U0, _>(&l).unwrap().hd, 1);
    assert_eq!(
        recsum::get::<U1, _>(&l),
        Err(InvalidVariantAccess::WrongIndex {
            requested: 1,
            active: 0
        })
    );
    assert_eq!(recsum::get::<U1, _>(&nil::<i32>()), Ok(&Nil));
}

#[test]
fn ordinal_get_mut() {
    let mut l = from_slice(&[1, 2]);
    recsum::get_mut::<U0, _>(&mut l).unwrap().hd = 10;
    assert_eq!(to_vec(&l), vec![10, 2]);
    assert!(recsum::get_mut::<U1, _>(&mut l).is_err());
}

#[test]
fn equality_is_structural() {
    assert_eq!(from_slice(&[1, 2]), cons(1, cons(2, nil())));
    assert_ne!(from_slice(&[1, 2]), from_slice(&[1]));
    assert_ne!(from_slice(&[1]), nil());
}

#[derive(Debug)]
struct Foo {
    clones: Rc<Cell<u32>>,
}

impl Clone for Foo {
    fn clone(&self) -> Self {
        self.clones.set(self.clones.get() + 1);
        Foo {
            clones: self.clones.clone(),
        }
    }
}

fn singleton(clones: &Rc<Cell<u32>>) -> List<Foo> {
    cons(
        Foo {
            clones: clones.clone(),
        },
        nil(),
    )
}

#[test]
fn copy_clones_the_payload_once() {
    let clones = Rc::new(Cell::new(0));
    let l = singleton(&clones);
    let m = l.clone();
    assert_eq!(clones.get(), 1);
    assert!(m.is_type_at::<U0>());
    assert!(l.is_type_at::<U0>());
}

#[test]
fn copy_assign_switches_alternative() {
    let clones = Rc::new(Cell::new(0));
    let l = singleton(&clones);
    let mut m = nil();
    assert!(m.is_type_at::<U1>());

    m.clone_from(&l);
    assert!(m.is_type_at::<U0>());
    assert_eq!(clones.get(), 1);
}

#[test]
fn move_never_clones() {
    let clones = Rc::new(Cell::new(0));
    let l = singleton(&clones);
    let mut m = nil();
    assert!(m.is_type_at::<U1>());

    m = l;
    assert!(m.is_type_at::<U0>());
    assert_eq!(clones.get(), 0);
}

#[test]
fn copies_are_independent() {
    let l = from_slice(&[1, 2, 3]);
    let mut m = l.clone();
    m.get_mut::<Cons<i32>, _>().unwrap().tl = nil();
    assert_eq!(to_vec(&l), vec![1, 2, 3]);
    assert_eq!(to_vec(&m), vec![1]);
}
