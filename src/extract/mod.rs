//! Keyword extraction: grammar loading, keyword and whitelist collection, and the initialization barrier.
//!
//! ## Pipeline
//!
//! 1. [`loader::load`] reads the `.jjt` grammar, writes the expanded `.jj` to the scratch directory and builds
//!    the token and production tables,
//! 2. [`keywords::collect_keywords`] and [`whitelist::collect_whitelist`] scan the two tables independently,
//! 3. the results are frozen into a [`KeywordCatalog`].
//!
//! [`Extractor`] runs this pipeline at most once and hands out the catalog as a shared `Arc` snapshot.
//!
//! ## Examples
//!
//! ```no_run
//! use jjkw::extract::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::new(
//!     "src/main/jjtree/JSqlParserCC.jjt",
//!     "target/jjgrammar",
//! ));
//! let catalog = extractor.initialize()?;
//! for label in catalog.restricted_keywords() {
//!     println!("{label}");
//! }
//! # Ok::<(), jjkw::extract::ExtractError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod keywords;
pub mod loader;
pub mod whitelist;

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use jjkw_core::Conventions;
use jjkw_syntax::GrammarTables;

pub use catalog::{KeywordCatalog, LabelDiff};
pub use error::ExtractError;

/// Inputs of an [`Extractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Path of the `.jjt` grammar
    pub grammar: PathBuf,
    /// Directory receiving the expanded `.jj` grammar
    pub scratch_dir: PathBuf,
    pub conventions: Conventions,
}

impl ExtractorConfig {
    pub fn new(grammar: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            grammar: grammar.into(),
            scratch_dir: scratch_dir.into(),
            conventions: Conventions::default(),
        }
    }

    /// Override the naming conventions
    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }
}

/// Build a catalog from already loaded tables.
pub fn build_catalog(tables: &GrammarTables, conventions: &Conventions) -> KeywordCatalog {
    let keywords = keywords::collect_keywords(tables);
    let whitelist = whitelist::collect_whitelist(tables, conventions);
    tracing::info!(
        keywords = keywords.len(),
        buckets = whitelist.len(),
        "keyword catalog built"
    );
    KeywordCatalog::new(keywords, whitelist)
}

#[derive(Debug)]
enum State {
    Uninitialized,
    Initializing,
    Initialized(Arc<KeywordCatalog>),
    Failed(String),
}

/// One-time initialization barrier around the extraction pipeline.
///
/// ## State machine
///
/// `Uninitialized -> Initializing -> Initialized` is one-way. A failed load moves to `Failed`; later
/// [`initialize`](Self::initialize) calls report the recorded failure without reloading, and
/// [`retry`](Self::retry) is the explicit way back.
///
/// Concurrent first callers serialize: one runs the pipeline, the others wait for its outcome.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    state: Mutex<State>,
    settled: Condvar,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            state: Mutex::new(State::Uninitialized),
            settled: Condvar::new(),
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run the pipeline once and return the shared catalog.
    ///
    /// ## Errors
    /// - The load error of this call if it ran the pipeline and the pipeline failed.
    /// - [`ExtractError::PreviouslyFailed`] if an earlier call failed.
    pub fn initialize(&self) -> Result<Arc<KeywordCatalog>, ExtractError> {
        self.initialize_with(|config| {
            loader::load(&config.grammar, &config.scratch_dir)
                .map(|tables| build_catalog(&tables, &config.conventions))
        })
    }

    fn initialize_with(
        &self,
        load: impl FnOnce(&ExtractorConfig) -> Result<KeywordCatalog, ExtractError>,
    ) -> Result<Arc<KeywordCatalog>, ExtractError> {
        let mut state = self.settled_state();
        match &*state {
            State::Initialized(catalog) => return Ok(Arc::clone(catalog)),
            State::Failed(message) => return Err(ExtractError::PreviouslyFailed(message.clone())),
            State::Uninitialized | State::Initializing => {}
        }
        *state = State::Initializing;
        drop(state);

        let guard = SettleOnUnwind { extractor: self };
        let outcome = load(&self.config).map(Arc::new);
        std::mem::forget(guard);

        let mut state = self.lock();
        *state = match &outcome {
            Ok(catalog) => State::Initialized(Arc::clone(catalog)),
            Err(e) => State::Failed(e.to_string()),
        };
        self.settled.notify_all();
        outcome
    }

    /// Forget a recorded failure and initialize again.
    ///
    /// Equivalent to [`initialize`](Self::initialize) when the extractor has not failed.
    pub fn retry(&self) -> Result<Arc<KeywordCatalog>, ExtractError> {
        self.forget_failure();
        self.initialize()
    }

    fn forget_failure(&self) {
        let mut state = self.settled_state();
        if matches!(*state, State::Failed(_)) {
            tracing::info!(grammar = %self.config.grammar.display(), "retrying keyword extraction");
            *state = State::Uninitialized;
        }
    }

    /// The catalog of a successful initialization.
    ///
    /// ## Errors
    /// - [`ExtractError::Uninitialized`] before initialization completed.
    /// - [`ExtractError::PreviouslyFailed`] after a failed initialization.
    pub fn catalog(&self) -> Result<Arc<KeywordCatalog>, ExtractError> {
        match &*self.lock() {
            State::Initialized(catalog) => Ok(Arc::clone(catalog)),
            State::Failed(message) => Err(ExtractError::PreviouslyFailed(message.clone())),
            State::Uninitialized | State::Initializing => Err(ExtractError::Uninitialized),
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(*self.lock(), State::Initialized(_))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the state, waiting out an initialization running on another thread.
    fn settled_state(&self) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        while matches!(*state, State::Initializing) {
            state = self.settled.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
        state
    }
}

/// Moves an `Initializing` extractor to `Failed` when the load unwinds, so waiters are released.
struct SettleOnUnwind<'a> {
    extractor: &'a Extractor,
}

impl Drop for SettleOnUnwind<'_> {
    fn drop(&mut self) {
        let grammar = self.extractor.config().grammar.display();
        tracing::error!(grammar = %grammar, "keyword extraction panicked");
        let mut state = self.extractor.lock();
        *state = State::Failed(format!("initialization panicked while loading '{grammar}'"));
        self.extractor.settled.notify_all();
    }
}
