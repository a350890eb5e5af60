/// Lazy generators — deferred, composable randomized computations.
///
/// A [`Generator`] is a re-invokable closure over an RNG handle and a context
/// value. Building or composing generators never touches the RNG; only
/// [`Generator::generate`] does.

use std::fmt;
use std::sync::Arc;

use crate::core::rng::{self, CountingRng, UniformRng};

type GenFn<T, C> = dyn Fn(&mut dyn UniformRng, &C) -> T + Send + Sync;

/// A deferred computation `(rng, context) -> T`.
pub struct Generator<T, C: ?Sized> {
    run: Arc<GenFn<T, C>>,
}

impl<T, C: ?Sized> Generator<T, C> {
    pub fn make<F>(f: F) -> Self
    where
        F: Fn(&mut dyn UniformRng, &C) -> T + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    pub fn generate(&self, rng: &mut dyn UniformRng, ctx: &C) -> T {
        (self.run)(rng, ctx)
    }

    /// True when both handles point at the same underlying closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.run, &other.run)
    }
}

impl<T: 'static, C: ?Sized + 'static> Generator<T, C> {
    /// A generator that ignores its inputs and returns a clone of `value`.
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self::make(move |_, _| value.clone())
    }

    /// Uniform pick from `items` via the choice primitive.
    ///
    /// An empty list is a construction bug in the caller's catalog and
    /// yields `T::default()` without drawing.
    pub fn choice(items: Vec<T>) -> Self
    where
        T: Clone + Default + Send + Sync,
    {
        Self::make(move |rng, _| rng::choose(rng, &items).cloned().unwrap_or_default())
    }

    pub fn map<U, F>(self, f: F) -> Generator<U, C>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Generator::make(move |rng, ctx| f(self.generate(rng, ctx)))
    }

    /// Feed this generator's output into a second randomized step.
    pub fn and_then<U, F>(self, f: F) -> Generator<U, C>
    where
        U: 'static,
        F: Fn(T, &mut dyn UniformRng, &C) -> U + Send + Sync + 'static,
    {
        Generator::make(move |rng, ctx| {
            let first = self.generate(rng, ctx);
            f(first, rng, ctx)
        })
    }
}

impl<T, C: ?Sized> Clone for Generator<T, C> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T, C: ?Sized> fmt::Debug for Generator<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator@{:p}", Arc::as_ptr(&self.run))
    }
}

/// Either a plain value or a generator of one.
///
/// Plain values behave as zero-argument constants, so call sites accept
/// both uniformly through [`Lazy::realize`].
pub enum Lazy<T, C: ?Sized> {
    Value(T),
    Deferred(Generator<T, C>),
}

/// A realized value together with the number of draws it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Realized<T> {
    pub value: T,
    pub draws: usize,
}

impl<T, C: ?Sized> Lazy<T, C> {
    pub fn value(value: T) -> Self {
        Lazy::Value(value)
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&mut dyn UniformRng, &C) -> T + Send + Sync + 'static,
    {
        Lazy::Deferred(Generator::make(f))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Lazy::Deferred(_))
    }

    /// The plain value, if this is not deferred.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Lazy::Value(v) => Some(v),
            Lazy::Deferred(_) => None,
        }
    }

    pub fn realize(&self, rng: &mut dyn UniformRng, ctx: &C) -> T
    where
        T: Clone,
    {
        match self {
            Lazy::Value(v) => v.clone(),
            Lazy::Deferred(g) => g.generate(rng, ctx),
        }
    }

    pub fn realize_counted(&self, rng: &mut dyn UniformRng, ctx: &C) -> Realized<T>
    where
        T: Clone,
    {
        let mut counting = CountingRng::new(rng);
        let value = self.realize(&mut counting, ctx);
        Realized {
            value,
            draws: counting.draws(),
        }
    }
}

impl<T, C: ?Sized> From<Generator<T, C>> for Lazy<T, C> {
    fn from(g: Generator<T, C>) -> Self {
        Lazy::Deferred(g)
    }
}

impl<T: Clone, C: ?Sized> Clone for Lazy<T, C> {
    fn clone(&self) -> Self {
        match self {
            Lazy::Value(v) => Lazy::Value(v.clone()),
            Lazy::Deferred(g) => Lazy::Deferred(g.clone()),
        }
    }
}

impl<T: fmt::Debug, C: ?Sized> fmt::Debug for Lazy<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lazy::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Lazy::Deferred(g) => f.debug_tuple("Deferred").field(g).finish(),
        }
    }
}

/// Values compare by value; generators compare by identity.
impl<T: PartialEq, C: ?Sized> PartialEq for Lazy<T, C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Lazy::Value(a), Lazy::Value(b)) => a == b,
            (Lazy::Deferred(a), Lazy::Deferred(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
