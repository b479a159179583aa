use std::cell::Cell;

use twofold::{just, provided, Nothing, Optional, OptionalVoid, UnsetError};

mod common;
use common::{clone_count, clone_from_count, drop_count, reset_counts, Counted, NoClone};

#[test]
fn ctors() {
    let a = Optional::<i32>::nothing();
    let b = just(3);
    let c = b.clone();
    let d = Optional::from(4);

    assert!(!a.is_set());
    assert!(b.is_set());
    assert!(c.is_set());
    assert!(d.is_set());

    assert_eq!(b.get(), Ok(&3));
    assert_eq!(c.get(), Ok(&3));
    assert_eq!(d.get(), Ok(&4));
}

#[test]
fn unset_access_fails() {
    let mut a = Optional::<i32>::nothing();
    assert_eq!(a.get(), Err(UnsetError));
    assert_eq!(a.as_option(), None);

    a.assign(2);
    assert_eq!(a.get(), Ok(&2));

    a.reset();
    assert_eq!(a.get_mut(), Err(UnsetError));
}

#[test]
fn set_nothing_resets() {
    let mut a = just(3);
    assert_ne!(a, Nothing);

    a.set_nothing(Nothing);
    assert!(!a.is_set());
    assert_eq!(a, Nothing);
    assert_eq!(Nothing, a);
}

#[test]
fn assign_reuses_or_constructs() {
    let mut o = Optional::<Counted<i32>>::nothing();

    reset_counts();
    o.assign(Counted::new(1));
    // Fresh construction: the value moves in, nothing is cloned or dropped.
    assert_eq!((clone_count(), clone_from_count(), drop_count()), (0, 0, 0));

    o.assign(Counted::new(2));
    // Assign-through: the old value is dropped by the place assignment.
    assert_eq!((clone_count(), clone_from_count(), drop_count()), (0, 0, 1));
    assert_eq!(o.get().unwrap().0, 2);
}

#[test]
fn clone_from_strategy() {
    let mut dst = just(Counted::new(1));
    let src = just(Counted::new(2));

    reset_counts();
    dst.clone_from(&src);
    // Both set: reuse via clone_from, no reconstruction.
    assert_eq!((clone_count(), clone_from_count(), drop_count()), (0, 1, 0));

    let unset = Optional::<Counted<i32>>::nothing();
    reset_counts();
    dst.clone_from(&unset);
    // Source unset: destroy and clear.
    assert_eq!((clone_count(), clone_from_count(), drop_count()), (0, 0, 1));

    reset_counts();
    dst.clone_from(&src);
    // Destination unset: clone-construct fresh.
    assert_eq!((clone_count(), clone_from_count(), drop_count()), (1, 0, 0));
    assert_eq!(dst.get().unwrap().0, 2);
}

#[test]
fn move_only_payloads() {
    let mut a = just(NoClone(5));
    assert_eq!(a.get(), Ok(&NoClone(5)));

    let moved = a.take();
    assert_eq!(moved, Some(NoClone(5)));
    assert!(!a.is_set());

    a.assign(NoClone(6));
    assert_eq!(a.into_option(), Some(NoClone(6)));
}

#[test]
fn reference_payload_aliases() {
    let shared = Cell::new(10);
    let a = just(&shared);
    let b = just(&shared);

    assert_eq!(a.get().unwrap().get(), 10);
    shared.set(20);
    assert_eq!(a.get().unwrap().get(), 20);

    // Mutating through one container is observed through the other.
    a.get().unwrap().set(30);
    assert_eq!(b.get().unwrap().get(), 30);
}

#[test]
fn reference_assignment_rebinds() {
    let x = 1;
    let y = 2;
    let mut o: Optional<&i32> = just(&x);
    let p: Optional<&i32> = just(&y);

    o.clone_from(&p);
    assert!(std::ptr::eq(*o.get().unwrap(), &y));
    assert_eq!(o.get(), Ok(&&2));
}

#[test]
fn mutation_through_mut_reference_payload() {
    let mut x = 3.0_f64;
    {
        let mut o: Optional<&mut f64> = just(&mut x);
        **o.get_mut().unwrap() += 1.0;
    }
    assert_eq!(x, 4.0);
}

fn odd_half(n: &i32) -> Optional<f64> {
    if n % 2 == 1 {
        just(f64::from(*n) / 2.0)
    } else {
        Optional::nothing()
    }
}

#[test]
fn bind() {
    let mut a = Optional::<i32>::nothing();
    let b: Optional<f64> = a.bind(odd_half);
    assert!(!b.is_set());

    a.assign(10);
    let b = a.bind(odd_half);
    assert!(!b.is_set());

    a.assign(11);
    let b = a.bind(odd_half);
    assert_eq!(b.get(), Ok(&5.5));

    let b = (&a >> odd_half).map(|x| *x as i32).bind(odd_half);
    assert_eq!(b.get(), Ok(&2.5));
}

#[test]
fn bind_invokes_exactly_once() {
    let calls = Cell::new(0);
    let f = |n: &i32| {
        calls.set(calls.get() + 1);
        just(n * 2)
    };

    let set = just(21);
    assert_eq!(set.bind(f).get(), Ok(&42));
    assert_eq!(calls.get(), 1);

    calls.set(0);
    let unset = Optional::<i32>::nothing();
    assert!(!unset.bind(f).is_set());
    assert_eq!(calls.get(), 0);
}

#[test]
fn bind_flattens() {
    // The step already returns an optional; bind yields it directly.
    let nested = just(3);
    let flat: Optional<f64> = nested.bind(odd_half);
    assert_eq!(flat.get(), Ok(&1.5));

    let unset: Optional<f64> = Optional::<i32>::nothing().bind(odd_half);
    assert!(!unset.is_set());
}

#[test]
fn bind_to_void() {
    let a = Optional::<i32>::nothing();
    let b = just(3);

    let calls = Cell::new(0);
    let vf = |_: &i32| {
        calls.set(calls.get() + 1);
    };

    let x: OptionalVoid = a.tap(vf);
    assert!(!x.is_set());
    assert_eq!(calls.get(), 0);

    let x: OptionalVoid = b.tap(vf);
    assert!(x.is_set());
    assert_eq!(calls.get(), 1);
}

#[test]
fn bind_to_optional_void() {
    let count = Cell::new(0);
    let count_if_odd = |i: &i32| {
        provided(i % 2 == 1).then(|| count.set(count.get() + 1)).map(|_| twofold::Void)
    };

    let x: OptionalVoid = Optional::<i32>::nothing().bind(count_if_odd);
    assert!(!x.is_set());
    assert_eq!(count.get(), 0);

    let x = just(3).bind(count_if_odd);
    assert!(x.is_set());
    assert_eq!(count.get(), 1);

    count.set(0);
    let x = just(4).bind(count_if_odd);
    assert!(!x.is_set());
    assert_eq!(count.get(), 0);
}

#[test]
fn bind_with_mut_ref() {
    let mut a = just(10);
    a.tap_mut(|v| *v += 1);
    assert_eq!(a.get(), Ok(&11));

    let doubled = &mut a
        >> (|v: &mut i32| {
            *v *= 2;
            just(*v)
        });
    assert_eq!(doubled.get(), Ok(&22));
    assert_eq!(a.get(), Ok(&22));
}

#[test]
fn conversion() {
    let a = Optional::<f64>::from_converted(just(3));
    let b = Optional::<f64>::from_converted(just(5_i32));
    assert_eq!(a.get(), Ok(&3.0));
    assert_eq!(b.get(), Ok(&5.0));

    let c = Optional::<f64>::from_converted(Optional::<i32>::nothing());
    assert!(!c.is_set());

    let y = just(3).map(|x| f64::from(*x) * 2.0);
    assert_eq!(y.get(), Ok(&6.0));
}

#[test]
fn take_and_unwrap_or() {
    let mut a = just(String::from("held"));
    assert_eq!(a.take(), Some(String::from("held")));
    assert_eq!(a.take(), None);
    assert!(!a.is_set());

    assert_eq!(just(3).unwrap_or(9), 3);
    assert_eq!(Optional::<i32>::nothing().unwrap_or(9), 9);
}

#[test]
fn equality_and_contains() {
    assert_eq!(just(1), just(1));
    assert_ne!(just(1), just(2));
    assert_ne!(just(1), Optional::nothing());
    assert_eq!(Optional::<i32>::nothing(), Optional::nothing());

    assert!(just(5).contains(&5));
    assert!(!just(5).contains(&6));
    assert!(!Optional::<i32>::nothing().contains(&5));
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", just(3)), "Just(3)");
    assert_eq!(format!("{:?}", Optional::<i32>::nothing()), "Nothing");
}

#[test]
fn std_option_bridges() {
    let o: Optional<i32> = Some(7).into();
    assert_eq!(o.get(), Ok(&7));

    let back: Option<i32> = o.into();
    assert_eq!(back, Some(7));

    let n: Optional<i32> = None.into();
    assert!(!n.is_set());
}

#[test]
fn drop_runs_once() {
    reset_counts();
    {
        let _o = just(Counted::new(1));
    }
    assert_eq!(drop_count(), 1);

    reset_counts();
    {
        let mut o = just(Counted::new(1));
        o.reset();
        assert_eq!(drop_count(), 1);
    }
    // Reset already destroyed the value; the container's drop adds nothing.
    assert_eq!(drop_count(), 1);
}
