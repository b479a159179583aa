//! Unsafe, centralized operations on `MaybeUninit<T>` slots.
//!
//! Both containers in this crate store their payloads as bare
//! `MaybeUninit<T>` cells and track liveness themselves (`Optional` with a
//! flag, `Either` with a tag). These helpers are the single place to audit:
//! - placement writes (`ptr::write`)
//! - bitwise moves out (`ptr::read`)
//! - drops (`drop_in_place`)
//! - assignment through a live value
//! - conversion to references (`assume_init_ref` / `assume_init_mut`)
//! - clone-construction and clone-assignment from a live source slot
//! - applying a closure to the held value (`apply` / `apply_mut`)
//!
//! ## Core invariant
//! A slot has no notion of being set; each caller pairs every `write` with
//! exactly one of `take` or `drop_in_place`, and only dereferences between
//! the two. The clone helpers route through the payload's real
//! `Clone::clone` / `Clone::clone_from`, never through a byte copy, so
//! instrumented payload types observe every construction strategy choice.
//!
//! A slot of reference type (`MaybeUninit<&T>` / `MaybeUninit<&mut T>`)
//! holds an address, and a slot of a zero-sized type holds nothing at all;
//! the same operations cover all three shapes.

use core::mem::MaybeUninit;
use core::ptr;

/// Placement-constructs a value into a slot.
///
/// # Safety
/// - If the slot currently holds a live `T`, it must have been `take`n or
///   dropped first; otherwise the old value is leaked or double-dropped
///   later.
#[inline(always)]
pub(crate) unsafe fn write<T>(slot: &mut MaybeUninit<T>, value: T) {
    // SAFETY: caller upholds the overwrite contract.
    unsafe { ptr::write(slot.as_mut_ptr(), value) }
}

/// Bitwise-moves the live value out of a slot, logically deinitializing it.
///
/// # Safety
/// - The slot must hold a live `T`.
/// - The slot must not be dereferenced or dropped again until rewritten.
#[inline(always)]
pub(crate) unsafe fn take<T>(slot: &mut MaybeUninit<T>) -> T {
    // SAFETY: caller asserts the slot is live.
    unsafe { ptr::read(slot.as_ptr()) }
}

/// Drops the live value in place.
///
/// # Safety
/// - The slot must hold a live `T`.
/// - Must not be called more than once for the same logical value.
#[inline(always)]
pub(crate) unsafe fn drop_in_place<T>(slot: &mut MaybeUninit<T>) {
    // SAFETY: caller asserts liveness and drop uniqueness.
    unsafe { ptr::drop_in_place(slot.as_mut_ptr()) }
}

/// Assigns through the live value, reusing its storage.
///
/// # Safety
/// - The slot must hold a live `T`.
#[inline(always)]
pub(crate) unsafe fn assign<T>(slot: &mut MaybeUninit<T>, value: T) {
    // SAFETY: caller asserts liveness; this is a plain place assignment,
    // so the old value's destructor runs as part of it.
    unsafe { *slot.assume_init_mut() = value }
}

/// Interprets a live slot as `&T`.
///
/// # Safety
/// - The slot must hold a live `T`.
#[inline(always)]
pub(crate) unsafe fn assume_ref<T>(slot: &MaybeUninit<T>) -> &T {
    // SAFETY: caller asserts the slot is live.
    unsafe { slot.assume_init_ref() }
}

/// Interprets a live slot as `&mut T`.
///
/// # Safety
/// - The slot must hold a live `T`.
#[inline(always)]
pub(crate) unsafe fn assume_mut<T>(slot: &mut MaybeUninit<T>) -> &mut T {
    // SAFETY: caller asserts the slot is live; exclusivity comes from the
    // `&mut` borrow of the slot itself.
    unsafe { slot.assume_init_mut() }
}

/// Clone-constructs `dst` from the live value in `src`.
///
/// Routes through `T::clone`; if the clone panics, `dst` is left untouched.
///
/// # Safety
/// - `src` must hold a live `T`.
/// - `dst` must not hold a live `T`.
#[inline]
pub(crate) unsafe fn clone_into<T: Clone>(dst: &mut MaybeUninit<T>, src: &MaybeUninit<T>) {
    // SAFETY: `src` is live per the caller; the clone completes before the
    // write, so an unwinding clone never publishes a partial value.
    unsafe {
        let value = assume_ref(src).clone();
        write(dst, value);
    }
}

/// Clone-assigns the live value in `dst` from the live value in `src`.
///
/// Routes through `T::clone_from`, reusing `dst`'s storage.
///
/// # Safety
/// - Both slots must hold live `T`s.
#[inline]
pub(crate) unsafe fn clone_assign<T: Clone>(dst: &mut MaybeUninit<T>, src: &MaybeUninit<T>) {
    // SAFETY: both slots are live per the caller.
    unsafe { assume_mut(dst).clone_from(assume_ref(src)) }
}

/// Applies `f` to the held value by shared reference, returning its result.
///
/// # Safety
/// - The slot must hold a live `T`.
#[inline(always)]
pub(crate) unsafe fn apply<T, R>(slot: &MaybeUninit<T>, f: impl FnOnce(&T) -> R) -> R {
    // SAFETY: caller asserts the slot is live.
    f(unsafe { assume_ref(slot) })
}

/// Applies `f` to the held value by exclusive reference, returning its
/// result.
///
/// # Safety
/// - The slot must hold a live `T`.
#[inline(always)]
pub(crate) unsafe fn apply_mut<T, R>(slot: &mut MaybeUninit<T>, f: impl FnOnce(&mut T) -> R) -> R {
    // SAFETY: caller asserts the slot is live.
    f(unsafe { assume_mut(slot) })
}
