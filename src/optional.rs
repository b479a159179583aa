//! `Optional<X>`: a value of type `X` or nothing, with monadic chaining.
//!
//! The container is a liveness flag plus one inline `MaybeUninit` slot; no
//! allocation, no default-constructibility requirement on `X`. On top of
//! the plain store/access surface it carries a small monadic vocabulary:
//!
//! - [`bind`](Optional::bind) / [`bind_mut`](Optional::bind_mut) chain a
//!   fallible step (`FnOnce(&X) -> Optional<Y>`), short-circuiting when
//!   unset; the result is the step's optional directly, so nesting like
//!   `Optional<Optional<Y>>` cannot arise. `>>` is the infix spelling.
//! - [`map`](Optional::map) / [`map_mut`](Optional::map_mut) lift an
//!   infallible step; a `()`-returning step lifts to `Optional<()>`.
//! - [`tap`](Optional::tap) / [`tap_mut`](Optional::tap_mut) run a step
//!   for its side effect, yielding an [`OptionalVoid`] that records
//!   whether the step ran.
//! - `a | b` picks the first set operand; `a & b` gates `b` on `a` being
//!   set; [`provided`] turns a predicate into the head of a chain.
//!
//! Instantiating at a reference type makes the slot hold an address:
//! `Optional<&T>` / `Optional<&mut T>` alias an external object, mutation
//! through the container mutates the referent, and optional-to-optional
//! assignment re-binds. Instantiating at [`Void`] gives the result type of
//! binding through a side-effecting step, where the flag is the entire
//! state.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::MaybeUninit;
use core::ops::{BitAnd, BitOr, Shr};

use crate::slot;

/// Error returned by checked access on an unset optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsetError;

impl fmt::Display for UnsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("optional value unset")
    }
}

impl std::error::Error for UnsetError {}

/// Error returned by dereferencing an [`OptionalVoid`], which never holds
/// an accessible value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoidAccessError;

impl fmt::Display for VoidAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dereference of void optional value")
    }
}

impl std::error::Error for VoidAccessError {}

/// The explicit "no value" sentinel.
///
/// Assign it with [`Optional::set_nothing`], or compare an optional
/// against it to test for unset-ness; the unset optional itself is
/// constructed with [`Optional::nothing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nothing;

/// Zero-sized payload of [`OptionalVoid`].
///
/// A set `Optional<Void>` records only that a side-effecting step ran;
/// there is no value to read. Use [`OptionalVoid::deref`] to get the
/// always-failing dereference, and [`OptionalVoid::then`] to continue a
/// chain with a no-argument step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Void;

/// The optional produced by binding through a side-effecting step.
pub type OptionalVoid = Optional<Void>;

/// A value of type `X`, or nothing.
pub struct Optional<X> {
    set: bool,
    value: MaybeUninit<X>,
}

/// Wraps a value in a set optional.
pub fn just<X>(value: X) -> Optional<X> {
    Optional {
        set: true,
        value: MaybeUninit::new(value),
    }
}

/// A set-or-unset [`OptionalVoid`] gated on a predicate; the entry point
/// of a bind chain.
///
/// ```
/// use twofold::provided;
///
/// let (p, q) = (14, 0);
/// let r = provided(q != 0).then(|| p / q) | -1;
/// assert_eq!(r.get(), Ok(&-1));
/// ```
pub fn provided(condition: bool) -> OptionalVoid {
    if condition {
        just(Void)
    } else {
        Optional::nothing()
    }
}

impl<X> Optional<X> {
    /// The unset optional.
    pub const fn nothing() -> Self {
        Optional {
            set: false,
            value: MaybeUninit::uninit(),
        }
    }

    /// True iff a value is held.
    pub const fn is_set(&self) -> bool {
        self.set
    }

    /// Checked access to the held value.
    ///
    /// # Errors
    /// [`UnsetError`] if unset.
    pub fn get(&self) -> Result<&X, UnsetError> {
        if self.set {
            // SAFETY: the flag says the slot is live.
            Ok(unsafe { slot::assume_ref(&self.value) })
        } else {
            Err(UnsetError)
        }
    }

    /// Checked mutable access to the held value.
    ///
    /// # Errors
    /// [`UnsetError`] if unset.
    pub fn get_mut(&mut self) -> Result<&mut X, UnsetError> {
        if self.set {
            // SAFETY: the flag says the slot is live.
            Ok(unsafe { slot::assume_mut(&mut self.value) })
        } else {
            Err(UnsetError)
        }
    }

    /// Reference to the held value without checking the flag.
    ///
    /// # Safety
    /// The optional must be set.
    pub unsafe fn get_unchecked(&self) -> &X {
        // SAFETY: caller guarantees the flag.
        unsafe { slot::assume_ref(&self.value) }
    }

    /// Mutable reference to the held value without checking the flag.
    ///
    /// # Safety
    /// The optional must be set.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut X {
        // SAFETY: caller guarantees the flag.
        unsafe { slot::assume_mut(&mut self.value) }
    }

    /// Non-failing query access.
    pub fn as_option(&self) -> Option<&X> {
        self.get().ok()
    }

    /// Non-failing mutable query access.
    pub fn as_option_mut(&mut self) -> Option<&mut X> {
        self.get_mut().ok()
    }

    /// Assigns the [`Nothing`] sentinel: destroys the held value, if any,
    /// leaving the optional unset.
    pub fn set_nothing(&mut self, _: Nothing) {
        self.reset();
    }

    /// Destroys the held value, if any, leaving the optional unset.
    pub fn reset(&mut self) {
        if self.set {
            self.set = false;
            // SAFETY: the flag said the slot was live; it is cleared first
            // so a panicking destructor cannot cause a second drop.
            unsafe { slot::drop_in_place(&mut self.value) };
        }
    }

    /// Moves the held value out, leaving the optional unset.
    pub fn take(&mut self) -> Option<X> {
        if self.set {
            self.set = false;
            // SAFETY: the flag said the slot was live and is now cleared.
            Some(unsafe { slot::take(&mut self.value) })
        } else {
            None
        }
    }

    /// Consumes the optional, yielding the held value if set.
    pub fn into_option(mut self) -> Option<X> {
        self.take()
    }

    /// The held value, or `default` if unset.
    pub fn unwrap_or(self, default: X) -> X {
        self.into_option().unwrap_or(default)
    }

    /// Assigns a value.
    ///
    /// Assigns through the live value when set (reusing its storage);
    /// constructs fresh and sets the flag when unset.
    pub fn assign(&mut self, value: X) {
        if self.set {
            // SAFETY: the flag says the slot is live.
            unsafe { slot::assign(&mut self.value, value) };
        } else {
            // SAFETY: the slot is dead; the flag flips after the write.
            unsafe { slot::write(&mut self.value, value) };
            self.set = true;
        }
    }

    /// Converts into an optional of a type the payload converts into,
    /// set/unset tracking `self`.
    pub fn from_converted<Y>(other: Optional<Y>) -> Self
    where
        Y: Into<X>,
    {
        match other.into_option() {
            Some(value) => just(value.into()),
            None => Optional::nothing(),
        }
    }

    /// True iff set and the held value equals `value`.
    pub fn contains<Y>(&self, value: &Y) -> bool
    where
        X: PartialEq<Y>,
    {
        match self.as_option() {
            Some(held) => held == value,
            None => false,
        }
    }

    /// Monadic bind: applies a fallible step to the held value.
    ///
    /// Unset short-circuits without invoking `f`; set invokes `f` exactly
    /// once with the value by shared reference and returns its optional
    /// directly.
    pub fn bind<Y, F>(&self, f: F) -> Optional<Y>
    where
        F: FnOnce(&X) -> Optional<Y>,
    {
        if self.set {
            // SAFETY: the flag says the slot is live.
            unsafe { slot::apply(&self.value, f) }
        } else {
            Optional::nothing()
        }
    }

    /// Monadic bind forwarding mutable access to the held value.
    pub fn bind_mut<Y, F>(&mut self, f: F) -> Optional<Y>
    where
        F: FnOnce(&mut X) -> Optional<Y>,
    {
        if self.set {
            // SAFETY: the flag says the slot is live.
            unsafe { slot::apply_mut(&mut self.value, f) }
        } else {
            Optional::nothing()
        }
    }

    /// Lifts an infallible step: `f`'s result wrapped in a set optional,
    /// or unset if `self` is unset.
    ///
    /// A step returning `()` lifts to `Optional<()>`, set iff `self` was.
    pub fn map<Y, F>(&self, f: F) -> Optional<Y>
    where
        F: FnOnce(&X) -> Y,
    {
        if self.set {
            // SAFETY: the flag says the slot is live.
            just(unsafe { slot::apply(&self.value, f) })
        } else {
            Optional::nothing()
        }
    }

    /// Lifts an infallible step with mutable access to the held value.
    pub fn map_mut<Y, F>(&mut self, f: F) -> Optional<Y>
    where
        F: FnOnce(&mut X) -> Y,
    {
        if self.set {
            // SAFETY: the flag says the slot is live.
            just(unsafe { slot::apply_mut(&mut self.value, f) })
        } else {
            Optional::nothing()
        }
    }

    /// Runs `f` for its side effect; the result records whether it ran.
    pub fn tap<F>(&self, f: F) -> OptionalVoid
    where
        F: FnOnce(&X),
    {
        self.map(f).map(|_: &()| Void)
    }

    /// Runs `f` for its side effect with mutable access to the held value.
    pub fn tap_mut<F>(&mut self, f: F) -> OptionalVoid
    where
        F: FnOnce(&mut X),
    {
        self.map_mut(f).map(|_: &()| Void)
    }
}

impl OptionalVoid {
    /// Continues a chain with a no-argument step; the step runs iff set.
    ///
    /// The spelled-out form of binding a void optional: there is no value
    /// to pass, only the fact that the chain is still live.
    pub fn then<R, F>(self, f: F) -> Optional<R>
    where
        F: FnOnce() -> R,
    {
        if self.set {
            just(f())
        } else {
            Optional::nothing()
        }
    }

    /// Gates another optional on this one being set.
    pub fn and<Y>(self, other: Optional<Y>) -> Optional<Y> {
        if self.set {
            other
        } else {
            Optional::nothing()
        }
    }

    /// Dereference of a void optional.
    ///
    /// # Errors
    /// Always [`VoidAccessError`]: a void optional records only set-ness
    /// and never holds an accessible value.
    pub fn deref(&self) -> Result<&Void, VoidAccessError> {
        Err(VoidAccessError)
    }

    /// A void optional tracking another optional's set-ness.
    pub fn from_set<Y>(other: &Optional<Y>) -> Self {
        provided(other.is_set())
    }
}

impl<X> Drop for Optional<X> {
    fn drop(&mut self) {
        if self.set {
            // SAFETY: the flag says the slot is live, and drop runs once.
            unsafe { slot::drop_in_place(&mut self.value) };
        }
    }
}

impl<X> Default for Optional<X> {
    fn default() -> Self {
        Optional::nothing()
    }
}

impl<X> From<X> for Optional<X> {
    fn from(value: X) -> Self {
        just(value)
    }
}

impl<X> From<Option<X>> for Optional<X> {
    fn from(value: Option<X>) -> Self {
        match value {
            Some(v) => just(v),
            None => Optional::nothing(),
        }
    }
}

impl<X> From<Optional<X>> for Option<X> {
    fn from(value: Optional<X>) -> Self {
        value.into_option()
    }
}

impl<X: Clone> Clone for Optional<X> {
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(value) => just(value.clone()),
            None => Optional::nothing(),
        }
    }

    /// Both set: clone-assign through the live value. Source unset: reset.
    /// Destination unset: clone-construct fresh.
    fn clone_from(&mut self, source: &Self) {
        match (self.set, source.set) {
            // SAFETY: both slots are live.
            (true, true) => unsafe { slot::clone_assign(&mut self.value, &source.value) },
            (true, false) => self.reset(),
            (false, true) => {
                // SAFETY: our slot is dead, the source's is live; the flag
                // flips only after the clone succeeds.
                unsafe { slot::clone_into(&mut self.value, &source.value) };
                self.set = true;
            }
            (false, false) => {}
        }
    }
}

impl<X: PartialEq> PartialEq for Optional<X> {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_option(), other.as_option()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<X: Eq> Eq for Optional<X> {}

/// An optional equals [`Nothing`] iff it is unset.
impl<X> PartialEq<Nothing> for Optional<X> {
    fn eq(&self, _: &Nothing) -> bool {
        !self.set
    }
}

impl<X> PartialEq<Optional<X>> for Nothing {
    fn eq(&self, other: &Optional<X>) -> bool {
        !other.set
    }
}

impl<X: Hash> Hash for Optional<X> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(u8::from(self.set));
        if let Some(value) = self.as_option() {
            value.hash(state);
        }
    }
}

impl<X: fmt::Debug> fmt::Debug for Optional<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Just").field(value).finish(),
            None => f.write_str("Nothing"),
        }
    }
}

/// `a >> f`: monadic bind. Consumes `a`; `f` still sees the value by
/// reference, matching [`Optional::bind`].
impl<X, Y, F> Shr<F> for Optional<X>
where
    F: FnOnce(&X) -> Optional<Y>,
{
    type Output = Optional<Y>;

    fn shr(self, f: F) -> Optional<Y> {
        self.bind(f)
    }
}

/// `&a >> f`: monadic bind by shared reference.
impl<'a, X, Y, F> Shr<F> for &'a Optional<X>
where
    F: FnOnce(&X) -> Optional<Y>,
{
    type Output = Optional<Y>;

    fn shr(self, f: F) -> Optional<Y> {
        self.bind(f)
    }
}

/// `&mut a >> f`: monadic bind forwarding mutable access.
impl<'a, X, Y, F> Shr<F> for &'a mut Optional<X>
where
    F: FnOnce(&mut X) -> Optional<Y>,
{
    type Output = Optional<Y>;

    fn shr(self, f: F) -> Optional<Y> {
        self.bind_mut(f)
    }
}

/// `a | b`: `a` if set, else `b`.
impl<X> BitOr for Optional<X> {
    type Output = Optional<X>;

    fn bitor(self, rhs: Self) -> Optional<X> {
        if self.set {
            self
        } else {
            rhs
        }
    }
}

/// `a | v` with a plain fallback value: `a` if set, else `just(v)`.
impl<X> BitOr<X> for Optional<X> {
    type Output = Optional<X>;

    fn bitor(self, rhs: X) -> Optional<X> {
        if self.set {
            self
        } else {
            just(rhs)
        }
    }
}

/// `a & b`: `b` if `a` is set, else unset of `b`'s type. `b`'s payload
/// does not depend on `a`'s.
impl<X, Y> BitAnd<Optional<Y>> for Optional<X> {
    type Output = Optional<Y>;

    fn bitand(self, rhs: Optional<Y>) -> Optional<Y> {
        if self.set {
            rhs
        } else {
            Optional::nothing()
        }
    }
}

/// `cond & b`: `b` gated on a plain boolean.
impl<Y> BitAnd<Optional<Y>> for bool {
    type Output = Optional<Y>;

    fn bitand(self, rhs: Optional<Y>) -> Optional<Y> {
        if self {
            rhs
        } else {
            Optional::nothing()
        }
    }
}
