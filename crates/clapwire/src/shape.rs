//! Runtime classification of configuration types.
//!
//! The `clap::Parser` bound already keeps most unsuitable types out at
//! compile time. What it lets through are wrappers: clap implements `Parser`
//! for `Box<T>`, so `parse::<Box<Cli>>` compiles. [`Shape`] classifies a
//! type from its descriptor so those can be refused before a parser is built.

use std::fmt;

/// The broad shape of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A named, non-primitive type. The only shape accepted for parsing.
    Struct,
    /// An owning or shared pointer (`Box`, `Rc`, `Arc`, raw pointers).
    Pointer,
    /// A borrowed reference.
    Reference,
    /// A scalar, `str`, `String` or the unit type.
    Primitive,
    /// A tuple.
    Tuple,
    /// A slice, array or `Vec`.
    Sequence,
    /// A `dyn Trait` object.
    TraitObject,
    /// A function pointer.
    Function,
}

const POINTER_PREFIXES: &[&str] = &[
    "alloc::boxed::Box<",
    "alloc::rc::Rc<",
    "alloc::sync::Arc<",
    "core::ptr::non_null::NonNull<",
    "*const ",
    "*mut ",
];

const SEQUENCE_PREFIXES: &[&str] = &[
    "[",
    "alloc::vec::Vec<",
    "alloc::collections::vec_deque::VecDeque<",
];

const PRIMITIVES: &[&str] = &[
    "()", "!", "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64", "alloc::string::String",
];

impl Shape {
    /// Classifies `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::classify(std::any::type_name::<T>())
    }

    /// Classifies a type from its descriptor, as produced by
    /// [`std::any::type_name`].
    pub fn classify(type_name: &str) -> Self {
        let name = type_name.trim();

        if PRIMITIVES.contains(&name) {
            Shape::Primitive
        } else if name.starts_with('&') {
            Shape::Reference
        } else if POINTER_PREFIXES.iter().any(|p| name.starts_with(p)) {
            Shape::Pointer
        } else if SEQUENCE_PREFIXES.iter().any(|p| name.starts_with(p)) {
            Shape::Sequence
        } else if name.starts_with('(') {
            Shape::Tuple
        } else if name.starts_with("dyn ") {
            Shape::TraitObject
        } else if name.starts_with("fn(")
            || name.starts_with("unsafe ")
            || name.starts_with("extern ")
        {
            Shape::Function
        } else {
            Shape::Struct
        }
    }

    /// Returns `true` for [`Shape::Struct`].
    pub fn is_struct(self) -> bool {
        self == Shape::Struct
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Struct => write!(f, "struct"),
            Shape::Pointer => write!(f, "pointer"),
            Shape::Reference => write!(f, "reference"),
            Shape::Primitive => write!(f, "primitive"),
            Shape::Tuple => write!(f, "tuple"),
            Shape::Sequence => write!(f, "sequence"),
            Shape::TraitObject => write!(f, "trait object"),
            Shape::Function => write!(f, "function"),
        }
    }
}
