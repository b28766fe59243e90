pub use enclose::*;

/// Builds a change listener, optionally cloning captures first.
///
/// `listener!((counter) change => counter.set(counter.get() + 1))`
#[macro_export]
macro_rules! listener {
    (( $($d_tt:tt)* ) $change:ident => $($b:tt)*) => {
        $crate::macros::enclose!(($( $d_tt )*) move |$change: &$crate::Change<'_>| { $($b)* })
    };
    ($change:ident => $($b:tt)*) => {
        move |$change: &$crate::Change<'_>| { $($b)* }
    };
}

#[macro_export]
macro_rules! getter {
    (( $($d_tt:tt)* ) $model:ident => $($b:tt)*) => {
        $crate::macros::enclose!(($( $d_tt )*) move |$model: &$crate::Model| -> $crate::Result<$crate::Value> { $($b)* })
    };
    ($model:ident => $($b:tt)*) => {
        move |$model: &$crate::Model| -> $crate::Result<$crate::Value> { $($b)* }
    };
}

#[macro_export]
macro_rules! setter {
    (( $($d_tt:tt)* ) $model:ident, $value:ident => $($b:tt)*) => {
        $crate::macros::enclose!(($( $d_tt )*) move |$model: &$crate::Model, $value: $crate::Value| -> $crate::Result<()> { $($b)* })
    };
    ($model:ident, $value:ident => $($b:tt)*) => {
        move |$model: &$crate::Model, $value: $crate::Value| -> $crate::Result<()> { $($b)* }
    };
}
