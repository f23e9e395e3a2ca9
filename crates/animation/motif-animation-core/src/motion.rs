//! Statically declared motion identifier sets.
//!
//! A motion set is an ordered list of logical motion names ("Idle", "Walk", ...). The ordinal of
//! each name is its slot in a [`ClipIndex`](crate::ClipIndex), so typed lookups never compare
//! strings at query time. Use [`motion_set!`](crate::motion_set) to declare one as a fieldless
//! enum; declaration order is the ordinal order.

/// Ordered set of motion identifiers with an ordinal mapping.
pub trait MotionSet: Copy + Sized + 'static {
    /// Identifier names in declaration order.
    const NAMES: &'static [&'static str];
    /// Every member, aligned with [`NAMES`](Self::NAMES).
    const ALL: &'static [Self];

    /// Ordinal of this member.
    fn index(self) -> usize;

    #[inline]
    fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    fn count() -> usize {
        Self::NAMES.len()
    }
}

/// Declare a fieldless enum implementing [`MotionSet`].
///
/// ```
/// motif_animation_core::motion_set! {
///     pub enum Locomotion { Idle, Walk, Run }
/// }
///
/// use motif_animation_core::MotionSet;
/// assert_eq!(Locomotion::Run.index(), 2);
/// assert_eq!(Locomotion::NAMES, &["Idle", "Walk", "Run"]);
/// ```
#[macro_export]
macro_rules! motion_set {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::MotionSet for $name {
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];
            const ALL: &'static [Self] = &[$($name::$variant),+];

            #[inline]
            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::MotionSet;

    crate::motion_set! {
        enum Combat { Guard, Attack, Hit, Die }
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        assert_eq!(Combat::Guard.index(), 0);
        assert_eq!(Combat::Die.index(), 3);
        assert_eq!(Combat::count(), 4);
    }

    #[test]
    fn names_and_members_are_aligned() {
        for (i, m) in Combat::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(m.name(), Combat::NAMES[i]);
        }
        assert_eq!(Combat::from_index(2), Some(Combat::Hit));
        assert_eq!(Combat::from_index(4), None);
    }
}
