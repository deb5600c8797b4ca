//! University timetable scheduler. A genetic algorithm search engine.
//!
//! Assigns study-classes (teacher + student-groups + course + required
//! classroom specialization) to (classroom, week-time) slots, minimizing
//! a weighted sum of soft-constraint violations.
//!
//! # Algorithm overview
//!
//! 1. **Task Model**: a validated [`TaskConfig`](types::TaskConfig) is
//!    preprocessed into a [`task::TaskModel`]: the slot table and the
//!    study-classes partitioned by required classroom specialization.
//! 2. **Genome**: a candidate schedule is one permutation of slot
//!    positions per specialization ([`genome::Individual`]).
//! 3. **Evaluator**: walks a genome through 14 incremental error counters
//!    ([`counters`]) to produce a weighted scalar score
//!    ([`evaluator::Evaluator`]).
//! 4. **GA driver** ([`ga::GaDriver`]): population init
//!    ([`creator::IndividualCreator`]), tournament selection with
//!    optional fitness sharing, ordered crossover, swap mutation, and
//!    elitism, across a generational loop.
//!
//! # Example
//!
//! ```no_run
//! use school_scheduler::parser::{load_task_config, require_valid};
//! use school_scheduler::task::TaskModel;
//! use school_scheduler::ga::GaDriver;
//! use rand::SeedableRng;
//! use std::path::Path;
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! let config = load_task_config(Path::new("task.json"))?;
//! require_valid(&config)?;
//! let task = TaskModel::build(&config.data)?;
//! let driver = GaDriver::new(&task, &config.weights, &config.params);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let outcome = driver.run(100, &mut rng, &Arc::new(AtomicBool::new(false)), None);
//! println!("best score: {:?}", outcome.best.fitness);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod counters;
pub mod creator;
pub mod domain;
pub mod error;
pub mod evaluator;
pub mod ga;
pub mod genome;
pub mod parser;
pub mod persistence;
pub mod reporter;
pub mod task;
pub mod types;

pub use error::{Result, SchedulerError};
