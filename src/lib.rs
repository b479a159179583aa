//! # `twofold` - Optional and Either Value Containers
//!
//! Two inline-storage building blocks for modelling "a value or nothing"
//! and "one of two alternatives", with monadic chaining for failure
//! propagation and no hidden allocation.
//!
//! ## Containers
//!
//! 1. **[`Optional<X>`]**:
//!    - A liveness flag plus one inline slot; `X` needs no default
//!      constructor and is never byte-copied behind its back.
//!    - Monadic [`bind`](Optional::bind) / [`map`](Optional::map) /
//!      [`tap`](Optional::tap) chaining with `>>` as the infix bind, plus
//!      the `|` (first set operand) and `&` (gate on set-ness)
//!      combinators and the [`provided`] chain entry point.
//!    - Instantiates at reference types (the slot holds an address and
//!      assignment re-binds) and at [`Void`] (the flag is the whole
//!      state).
//!
//! 2. **[`Either<A, B>`]**:
//!    - A strictly binary tagged union: two `MaybeUninit` slots overlaid
//!      in a manual `union`, a tag selecting the live one, and full value
//!      semantics re-derived over the tag transitions.
//!    - Assignment reuses live storage on a matching tag and
//!      destroys-then-constructs on a mismatch; a panic in the
//!      constructing step leaves the documented
//!      [valueless](Either::valueless_by_exception) state rather than
//!      corruption, and the panic propagates.
//!
//! ## Safety Guarantees
//!
//! - **Centralized unsafe foundations**: every raw-slot operation (write,
//!   move-out, drop, assign-through, reference projection) lives in one
//!   audited internal module; the containers hold the only liveness
//!   state and uphold the slot contracts at every call.
//! - **Real construction/assignment only**: payloads are cloned, assigned
//!   and dropped through their own `Clone`/`Drop` impls, never duplicated
//!   via raw memory copies, so instrumented payload types observe every
//!   strategy choice.
//! - **Unwind consistency**: every destruct/construct window in a tag
//!   transition publishes its sentinel state first; unwinding user code
//!   cannot leave a container that double-drops or reads dead storage.
//!
//! ## Example
//!
//! ```rust
//! use twofold::{just, provided, Optional};
//!
//! fn odd_half(n: &i32) -> Optional<f64> {
//!     provided(n % 2 == 1).then(|| f64::from(*n) / 2.0)
//! }
//!
//! let a = just(11);
//! let b = &a >> odd_half;
//! assert_eq!(b.get(), Ok(&5.5));
//!
//! // Unset short-circuits the chain without running the steps.
//! let c = Optional::<i32>::nothing().bind(odd_half);
//! assert!(!c.is_set());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod either;
mod optional;
mod slot;

#[cfg(feature = "serde")]
mod serde_impls;

pub use either::{Either, WrongAlternative, NPOS};
pub use optional::{
    just, provided, Nothing, Optional, OptionalVoid, UnsetError, Void, VoidAccessError,
};

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // The sentinels and the void payload are ZSTs.
    assert!(mem::size_of::<Nothing>() == 0);
    assert!(mem::size_of::<Void>() == 0);

    // An optional is its payload plus a flag, rounded to alignment; the
    // void optional collapses to the flag alone.
    assert!(mem::size_of::<OptionalVoid>() == 1);
    assert!(mem::size_of::<Optional<u8>>() == 2);
    assert!(mem::size_of::<Optional<u64>>() <= 2 * mem::size_of::<u64>());
    assert!(mem::align_of::<Optional<u64>>() == mem::align_of::<u64>());

    // Either storage is the larger alternative plus a tag, rounded to
    // alignment; no allocation, no boxing.
    assert!(mem::size_of::<Either<Void, Void>>() == 1);
    assert!(mem::size_of::<Either<u8, u8>>() == 2);
    assert!(mem::size_of::<Either<u64, u8>>() <= 2 * mem::size_of::<u64>());
    assert!(mem::align_of::<Either<u64, u8>>() == mem::align_of::<u64>());

    // A reference payload is stored as an address, not a copy.
    assert!(mem::size_of::<Optional<&u64>>() <= 2 * mem::size_of::<usize>());
};
