//! `Either<A, B>`: a strictly binary tagged union with inline storage.
//!
//! Unlike `Result`, neither alternative is an error by convention, and
//! unlike an enum, the container keeps an explicit third *valueless* tag:
//! a cross-alternative assignment first destroys the live value and then
//! constructs the new one, and if that construction panics there is no old
//! value to restore. The container is left valueless, a well-defined
//! recoverable dead state rather than corruption, and the panic propagates.
//!
//! Storage is a manual `union` of two `MaybeUninit` slots sized to the
//! larger alternative; the tag is the single source of truth for which
//! slot is live. All slot operations go through `crate::slot`, so every
//! construction and assignment runs the payload's real `Clone`/assignment
//! machinery.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{ManuallyDrop, MaybeUninit};

use crate::slot;

/// The `index()` result of a valueless either.
pub const NPOS: usize = usize::MAX;

/// Error returned by checked access when the requested alternative is not
/// the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrongAlternative {
    /// Index of the alternative the caller asked for (0 or 1).
    pub requested: usize,
    /// Index of the live alternative, or [`NPOS`] if valueless.
    pub active: usize,
}

impl fmt::Display for WrongAlternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.active == NPOS {
            write!(f, "alternative {} accessed on a valueless either", self.requested)
        } else {
            write!(
                f,
                "alternative {} accessed while alternative {} is live",
                self.requested, self.active
            )
        }
    }
}

impl std::error::Error for WrongAlternative {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Tag {
    First = 0,
    Second = 1,
    Valueless = 2,
}

union Storage<A, B> {
    first: ManuallyDrop<MaybeUninit<A>>,
    second: ManuallyDrop<MaybeUninit<B>>,
}

impl<A, B> Storage<A, B> {
    const fn uninit() -> Self {
        Storage {
            first: ManuallyDrop::new(MaybeUninit::uninit()),
        }
    }
}

/// A value of type `A` or a value of type `B`, tagged by which is live.
///
/// Construct with [`Either::first`] / [`Either::second`] (or the `Into`
/// variants), inspect with [`index`](Either::index) and the checked,
/// querying, or unchecked accessors, and assign with
/// [`assign_first`](Either::assign_first) / [`assign_second`](Either::assign_second)
/// or `clone_from`. See the module docs for the valueless state.
pub struct Either<A, B> {
    tag: Tag,
    data: Storage<A, B>,
}

impl<A, B> Either<A, B> {
    /// Constructs the first alternative.
    pub fn first(value: A) -> Self {
        let mut data = Storage::uninit();
        // SAFETY: freshly uninitialized slot.
        unsafe { slot::write(&mut *data.first, value) };
        Either {
            tag: Tag::First,
            data,
        }
    }

    /// Constructs the second alternative.
    pub fn second(value: B) -> Self {
        let mut data = Storage::uninit();
        // SAFETY: freshly uninitialized slot.
        unsafe { slot::write(&mut *data.second, value) };
        Either {
            tag: Tag::Second,
            data,
        }
    }

    /// Constructs the first alternative from anything convertible into it.
    pub fn from_first(value: impl Into<A>) -> Self {
        Self::first(value.into())
    }

    /// Constructs the second alternative from anything convertible into it.
    pub fn from_second(value: impl Into<B>) -> Self {
        Self::second(value.into())
    }

    fn valueless() -> Self {
        Either {
            tag: Tag::Valueless,
            data: Storage::uninit(),
        }
    }

    /// Index of the live alternative: 0, 1, or [`NPOS`] if valueless.
    pub const fn index(&self) -> usize {
        match self.tag {
            Tag::First => 0,
            Tag::Second => 1,
            Tag::Valueless => NPOS,
        }
    }

    /// True iff the first alternative is live.
    pub const fn is_first(&self) -> bool {
        matches!(self.tag, Tag::First)
    }

    /// True iff the second alternative is live.
    pub const fn is_second(&self) -> bool {
        matches!(self.tag, Tag::Second)
    }

    /// True iff a failed cross-alternative assignment left this either with
    /// no live value.
    pub const fn valueless_by_exception(&self) -> bool {
        matches!(self.tag, Tag::Valueless)
    }

    /// Reference to the first alternative without checking the tag.
    ///
    /// # Safety
    /// The first alternative must be live (`index() == 0`).
    pub unsafe fn first_unchecked(&self) -> &A {
        // SAFETY: caller guarantees the tag matches.
        unsafe { slot::assume_ref(&*self.data.first) }
    }

    /// Reference to the second alternative without checking the tag.
    ///
    /// # Safety
    /// The second alternative must be live (`index() == 1`).
    pub unsafe fn second_unchecked(&self) -> &B {
        // SAFETY: caller guarantees the tag matches.
        unsafe { slot::assume_ref(&*self.data.second) }
    }

    /// Mutable reference to the first alternative without checking the tag.
    ///
    /// # Safety
    /// The first alternative must be live (`index() == 0`).
    pub unsafe fn first_unchecked_mut(&mut self) -> &mut A {
        // SAFETY: caller guarantees the tag matches.
        unsafe { slot::assume_mut(&mut *self.data.first) }
    }

    /// Mutable reference to the second alternative without checking the tag.
    ///
    /// # Safety
    /// The second alternative must be live (`index() == 1`).
    pub unsafe fn second_unchecked_mut(&mut self) -> &mut B {
        // SAFETY: caller guarantees the tag matches.
        unsafe { slot::assume_mut(&mut *self.data.second) }
    }

    /// Checked access to the first alternative.
    ///
    /// # Errors
    /// [`WrongAlternative`] if the live alternative is not the first.
    pub fn try_first(&self) -> Result<&A, WrongAlternative> {
        match self.tag {
            // SAFETY: tag says the first slot is live.
            Tag::First => Ok(unsafe { self.first_unchecked() }),
            _ => Err(WrongAlternative {
                requested: 0,
                active: self.index(),
            }),
        }
    }

    /// Checked access to the second alternative.
    ///
    /// # Errors
    /// [`WrongAlternative`] if the live alternative is not the second.
    pub fn try_second(&self) -> Result<&B, WrongAlternative> {
        match self.tag {
            // SAFETY: tag says the second slot is live.
            Tag::Second => Ok(unsafe { self.second_unchecked() }),
            _ => Err(WrongAlternative {
                requested: 1,
                active: self.index(),
            }),
        }
    }

    /// Checked mutable access to the first alternative.
    ///
    /// # Errors
    /// [`WrongAlternative`] if the live alternative is not the first.
    pub fn try_first_mut(&mut self) -> Result<&mut A, WrongAlternative> {
        match self.tag {
            // SAFETY: tag says the first slot is live.
            Tag::First => Ok(unsafe { self.first_unchecked_mut() }),
            _ => Err(WrongAlternative {
                requested: 0,
                active: self.index(),
            }),
        }
    }

    /// Checked mutable access to the second alternative.
    ///
    /// # Errors
    /// [`WrongAlternative`] if the live alternative is not the second.
    pub fn try_second_mut(&mut self) -> Result<&mut B, WrongAlternative> {
        match self.tag {
            // SAFETY: tag says the second slot is live.
            Tag::Second => Ok(unsafe { self.second_unchecked_mut() }),
            _ => Err(WrongAlternative {
                requested: 1,
                active: self.index(),
            }),
        }
    }

    /// Non-failing query access: the first alternative if live, else `None`.
    pub fn get_first(&self) -> Option<&A> {
        self.try_first().ok()
    }

    /// Non-failing query access: the second alternative if live, else `None`.
    pub fn get_second(&self) -> Option<&B> {
        self.try_second().ok()
    }

    /// Mutable query access to the first alternative.
    pub fn get_first_mut(&mut self) -> Option<&mut A> {
        self.try_first_mut().ok()
    }

    /// Mutable query access to the second alternative.
    pub fn get_second_mut(&mut self) -> Option<&mut B> {
        self.try_second_mut().ok()
    }

    /// Assigns a value to the first alternative.
    ///
    /// Assigns through the live value when the first alternative is already
    /// live; otherwise destroys the live value (if any) and constructs the
    /// first alternative fresh. Recovers a valueless either.
    pub fn assign_first(&mut self, value: A) {
        match self.tag {
            // SAFETY: tag says the first slot is live.
            Tag::First => unsafe { slot::assign(&mut *self.data.first, value) },
            Tag::Second => {
                self.tag = Tag::Valueless;
                // SAFETY: the second slot was live; the valueless tag is
                // already published, so a panicking drop leaves a
                // consistent state. The write follows into a dead slot.
                unsafe {
                    slot::drop_in_place(&mut *self.data.second);
                    slot::write(&mut *self.data.first, value);
                }
                self.tag = Tag::First;
            }
            Tag::Valueless => {
                // SAFETY: no slot is live; write into the dead first slot.
                unsafe { slot::write(&mut *self.data.first, value) };
                self.tag = Tag::First;
            }
        }
    }

    /// Assigns a value to the second alternative.
    ///
    /// Mirror of [`assign_first`](Either::assign_first).
    pub fn assign_second(&mut self, value: B) {
        match self.tag {
            // SAFETY: tag says the second slot is live.
            Tag::Second => unsafe { slot::assign(&mut *self.data.second, value) },
            Tag::First => {
                self.tag = Tag::Valueless;
                // SAFETY: the first slot was live; valueless tag published
                // before the destruct/construct window.
                unsafe {
                    slot::drop_in_place(&mut *self.data.first);
                    slot::write(&mut *self.data.second, value);
                }
                self.tag = Tag::Second;
            }
            Tag::Valueless => {
                // SAFETY: no slot is live; write into the dead second slot.
                unsafe { slot::write(&mut *self.data.second, value) };
                self.tag = Tag::Second;
            }
        }
    }

    /// Consumes the either, yielding `Ok` for the first alternative and
    /// `Err` for the second.
    ///
    /// # Panics
    /// If the either is valueless.
    pub fn into_result(mut self) -> Result<A, B> {
        match self.tag {
            Tag::First => {
                self.tag = Tag::Valueless;
                // SAFETY: the first slot was live; the tag now says
                // valueless, so the destructor skips it.
                Ok(unsafe { slot::take(&mut *self.data.first) })
            }
            Tag::Second => {
                self.tag = Tag::Valueless;
                // SAFETY: as above for the second slot.
                Err(unsafe { slot::take(&mut *self.data.second) })
            }
            Tag::Valueless => panic!("into_result on a valueless either"),
        }
    }

    /// Applies `f` to the first alternative, passing the second through.
    ///
    /// A valueless either stays valueless.
    pub fn map_first<C>(mut self, f: impl FnOnce(A) -> C) -> Either<C, B> {
        match self.tag {
            Tag::First => {
                self.tag = Tag::Valueless;
                // SAFETY: the first slot was live and the tag now skips it.
                let value = unsafe { slot::take(&mut *self.data.first) };
                Either::first(f(value))
            }
            Tag::Second => {
                self.tag = Tag::Valueless;
                // SAFETY: as above for the second slot.
                let value = unsafe { slot::take(&mut *self.data.second) };
                Either::second(value)
            }
            Tag::Valueless => Either::valueless(),
        }
    }

    /// Applies `f` to the second alternative, passing the first through.
    ///
    /// A valueless either stays valueless.
    pub fn map_second<C>(mut self, f: impl FnOnce(B) -> C) -> Either<A, C> {
        match self.tag {
            Tag::First => {
                self.tag = Tag::Valueless;
                // SAFETY: the first slot was live and the tag now skips it.
                let value = unsafe { slot::take(&mut *self.data.first) };
                Either::first(value)
            }
            Tag::Second => {
                self.tag = Tag::Valueless;
                // SAFETY: as above for the second slot.
                let value = unsafe { slot::take(&mut *self.data.second) };
                Either::second(f(value))
            }
            Tag::Valueless => Either::valueless(),
        }
    }

    /// Folds the either into a single value.
    ///
    /// # Panics
    /// If the either is valueless.
    pub fn either<R>(self, f: impl FnOnce(A) -> R, g: impl FnOnce(B) -> R) -> R {
        match self.into_result() {
            Ok(a) => f(a),
            Err(b) => g(b),
        }
    }
}

impl<A, B> Drop for Either<A, B> {
    fn drop(&mut self) {
        match self.tag {
            // SAFETY: the tag says which slot is live; valueless drops
            // nothing.
            Tag::First => unsafe { slot::drop_in_place(&mut *self.data.first) },
            Tag::Second => unsafe { slot::drop_in_place(&mut *self.data.second) },
            Tag::Valueless => {}
        }
    }
}

impl<A: Clone, B: Clone> Clone for Either<A, B> {
    fn clone(&self) -> Self {
        match self.tag {
            // SAFETY: tag-matched access.
            Tag::First => Either::first(unsafe { self.first_unchecked() }.clone()),
            Tag::Second => Either::second(unsafe { self.second_unchecked() }.clone()),
            Tag::Valueless => Either::valueless(),
        }
    }

    /// The four-way assignment transition table.
    ///
    /// Same tag: clone-assign through the live value, no reconstruction.
    /// Differing tag: destroy the live value, then clone the source value
    /// into place; a panicking clone leaves `self` valueless. Valueless
    /// source: destroy the live value and become valueless.
    fn clone_from(&mut self, source: &Self) {
        match (self.tag, source.tag) {
            (Tag::First, Tag::First) => {
                // SAFETY: both first slots are live.
                unsafe { slot::clone_assign(&mut *self.data.first, &*source.data.first) }
            }
            (Tag::Second, Tag::Second) => {
                // SAFETY: both second slots are live.
                unsafe { slot::clone_assign(&mut *self.data.second, &*source.data.second) }
            }
            (Tag::First, Tag::Second) => {
                self.tag = Tag::Valueless;
                // SAFETY: the first slot was live; the valueless tag is
                // published before the destruct/construct window, so an
                // unwind out of either step leaves a consistent state.
                unsafe {
                    slot::drop_in_place(&mut *self.data.first);
                    slot::clone_into(&mut *self.data.second, &*source.data.second);
                }
                self.tag = Tag::Second;
            }
            (Tag::Second, Tag::First) => {
                self.tag = Tag::Valueless;
                // SAFETY: mirror of the case above.
                unsafe {
                    slot::drop_in_place(&mut *self.data.second);
                    slot::clone_into(&mut *self.data.first, &*source.data.first);
                }
                self.tag = Tag::First;
            }
            (Tag::First, Tag::Valueless) => {
                self.tag = Tag::Valueless;
                // SAFETY: the first slot was live.
                unsafe { slot::drop_in_place(&mut *self.data.first) };
            }
            (Tag::Second, Tag::Valueless) => {
                self.tag = Tag::Valueless;
                // SAFETY: the second slot was live.
                unsafe { slot::drop_in_place(&mut *self.data.second) };
            }
            (Tag::Valueless, Tag::First) => {
                // SAFETY: no slot of `self` is live; clone into the dead
                // first slot. The tag flips only after the clone succeeds.
                unsafe { slot::clone_into(&mut *self.data.first, &*source.data.first) };
                self.tag = Tag::First;
            }
            (Tag::Valueless, Tag::Second) => {
                // SAFETY: mirror of the case above.
                unsafe { slot::clone_into(&mut *self.data.second, &*source.data.second) };
                self.tag = Tag::Second;
            }
            (Tag::Valueless, Tag::Valueless) => {}
        }
    }
}

impl<A: Default, B> Default for Either<A, B> {
    /// Defaults to the first alternative.
    fn default() -> Self {
        Either::first(A::default())
    }
}

impl<A, B> From<Result<A, B>> for Either<A, B> {
    fn from(value: Result<A, B>) -> Self {
        match value {
            Ok(a) => Either::first(a),
            Err(b) => Either::second(b),
        }
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Either<A, B> {
    fn eq(&self, other: &Self) -> bool {
        match (self.tag, other.tag) {
            // SAFETY: tag-matched access on both sides.
            (Tag::First, Tag::First) => unsafe {
                self.first_unchecked() == other.first_unchecked()
            },
            (Tag::Second, Tag::Second) => unsafe {
                self.second_unchecked() == other.second_unchecked()
            },
            (Tag::Valueless, Tag::Valueless) => true,
            _ => false,
        }
    }
}

impl<A: Eq, B: Eq> Eq for Either<A, B> {}

// Sort rank of a tag under the pinned order.
const fn rank(tag: Tag) -> u8 {
    match tag {
        Tag::Valueless => 0,
        Tag::First => 1,
        Tag::Second => 2,
    }
}

/// Ordering is pinned as: valueless < first alternative < second
/// alternative, with same-alternative comparisons delegating to the values.
impl<A: PartialOrd, B: PartialOrd> PartialOrd for Either<A, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.tag, other.tag) {
            // SAFETY: tag-matched access on both sides.
            (Tag::First, Tag::First) => unsafe {
                self.first_unchecked().partial_cmp(other.first_unchecked())
            },
            (Tag::Second, Tag::Second) => unsafe {
                self.second_unchecked().partial_cmp(other.second_unchecked())
            },
            _ => Some(rank(self.tag).cmp(&rank(other.tag))),
        }
    }
}

impl<A: Ord, B: Ord> Ord for Either<A, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.tag, other.tag) {
            // SAFETY: tag-matched access on both sides.
            (Tag::First, Tag::First) => unsafe {
                self.first_unchecked().cmp(other.first_unchecked())
            },
            (Tag::Second, Tag::Second) => unsafe {
                self.second_unchecked().cmp(other.second_unchecked())
            },
            _ => rank(self.tag).cmp(&rank(other.tag)),
        }
    }
}

impl<A: Hash, B: Hash> Hash for Either<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag as u8);
        match self.tag {
            // SAFETY: tag-matched access.
            Tag::First => unsafe { self.first_unchecked() }.hash(state),
            Tag::Second => unsafe { self.second_unchecked() }.hash(state),
            Tag::Valueless => {}
        }
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for Either<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            // SAFETY: tag-matched access.
            Tag::First => f
                .debug_tuple("First")
                .field(unsafe { self.first_unchecked() })
                .finish(),
            Tag::Second => f
                .debug_tuple("Second")
                .field(unsafe { self.second_unchecked() })
                .finish(),
            Tag::Valueless => f.write_str("Valueless"),
        }
    }
}
