use std::iter::zip;
use std::sync::mpsc;
use std::thread;

use ndarray::{concatenate, s, Array2, Axis};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("nothing to join")]
    Empty,
    #[error("part {0} is missing or duplicated")]
    Part(usize),
    #[error("parts do not line up")]
    Shape,
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("a worker thread hung up")]
    WorkerLost,
    #[error(transparent)]
    Join(#[from] JoinError),
}

pub trait Split: Sized {
    fn split_parts(&self, n: usize) -> Vec<Self>;

    fn parts(&self, n: usize) -> Vec<SplitPart<Self>> {
        self.split_parts(n)
            .into_iter()
            .enumerate()
            .map(|(n, part)| SplitPart::new(part, n))
            .collect()
    }
}

pub trait Join: Sized {
    fn join_parts(parts: Vec<Self>) -> Result<Self, JoinError>;
}

/// Splits `0..len` into `n` contiguous ranges; the first `len % n` ranges
/// get one extra element.
pub fn band_bounds(len: usize, n: usize) -> Vec<(usize, usize)> {
    let size = len / n;
    let size_xtra = len % n;

    let mut bounds = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let end = start + size + usize::from(i < size_xtra);
        bounds.push((start, end));
        start = end;
    }
    bounds
}

impl<T: Clone> Split for Array2<T> {
    fn split_parts(&self, n: usize) -> Vec<Self> {
        band_bounds(self.nrows(), n)
            .into_iter()
            .map(|(start, end)| self.slice(s![start..end, ..]).to_owned())
            .collect()
    }
}

impl<T: Clone> Join for Array2<T> {
    fn join_parts(parts: Vec<Self>) -> Result<Self, JoinError> {
        if parts.is_empty() {
            return Err(JoinError::Empty);
        }
        let views: Vec<_> = parts.iter().map(|part| part.view()).collect();
        concatenate(Axis(0), &views).map_err(|_| JoinError::Shape)
    }
}

#[derive(Debug)]
pub struct SplitPart<T> {
    pub n: usize,
    pub part: T,
}

impl<T> SplitPart<T> {
    pub fn new(part: T, n: usize) -> Self {
        Self { part, n }
    }

    pub fn join(mut splits: Vec<SplitPart<T>>) -> Result<T, JoinError>
    where
        T: Join,
    {
        splits.sort_by_key(|s| s.n);
        for (i, s) in splits.iter().enumerate() {
            if s.n != i {
                return Err(JoinError::Part(i));
            }
        }
        T::join_parts(splits.into_iter().map(|s| s.part).collect())
    }
}

type Job<I, O> = (SplitPart<I>, mpsc::Sender<SplitPart<O>>);

struct Worker<I, O> {
    tx: mpsc::Sender<Job<I, O>>,
}

impl<I, O> Worker<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn new<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Job<I, O>>();
        thread::spawn(move || {
            while let Ok((SplitPart { n, part }, reply)) = rx.recv() {
                if reply.send(SplitPart::new(f(part), n)).is_err() {
                    return;
                }
            }
        });
        Self { tx }
    }
}

/// A fixed set of threads, each running the same function on its share of
/// the input. Threads exit when the pool is dropped.
pub struct WorkerPool<I, O> {
    workers: Vec<Worker<I, O>>,
}

impl<I, O> WorkerPool<I, O>
where
    I: Split + Send + 'static,
    O: Join + Send + 'static,
{
    pub fn with<G, F>(n: usize, make: G) -> Self
    where
        G: Fn() -> F,
        F: Fn(I) -> O + Send + 'static,
    {
        assert!(n > 0, "no workers");
        Self {
            workers: (0..n).map(|_| Worker::new(make())).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn call(&self, input: I) -> Result<O, PoolError> {
        let (tx, rx) = mpsc::channel();
        for (worker, part) in zip(&self.workers, input.parts(self.size())) {
            worker
                .tx
                .send((part, tx.clone()))
                .map_err(|_| PoolError::WorkerLost)?;
        }
        // a panicking worker drops its reply sender, which ends the iterator early
        drop(tx);
        let parts: Vec<SplitPart<O>> = rx.iter().collect();
        if parts.len() != self.size() {
            return Err(PoolError::WorkerLost);
        }
        Ok(SplitPart::join(parts)?)
    }
}
