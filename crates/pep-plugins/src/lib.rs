//! Pre-processor / post-processor plug-in interfaces and the ordered chains
//! that run them around an `authorize` call.
//!
//! A `PreProcessor` rewrites a [`Request`] before it is marshaled and sent;
//! a `PostProcessor` rewrites a [`Response`] (in light of the `Request` that
//! produced it) after it is received and unmarshaled. Both run as an
//! ordered chain that short-circuits on the first error, mirroring a
//! middleware pipeline rather than a single hook.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use pep_policy::{Request, Response};

// ── Error ────────────────────────────────────────────────────────────

/// An error raised by a plug-in's lifecycle method.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// A plug-in's `init` failed.
    #[error("pre-processor {id:?} failed to initialize: {detail}")]
    PreProcessorInit {
        /// The failing plug-in's id.
        id: String,
        /// A human-readable detail string.
        detail: String,
    },
    /// A pre-processor's `process` failed.
    #[error("pre-processor {id:?} failed: {detail}")]
    PreProcessorRun {
        /// The failing plug-in's id.
        id: String,
        /// A human-readable detail string.
        detail: String,
    },
    /// A plug-in's `init` failed.
    #[error("post-processor {id:?} failed to initialize: {detail}")]
    PostProcessorInit {
        /// The failing plug-in's id.
        id: String,
        /// A human-readable detail string.
        detail: String,
    },
    /// A post-processor's `process` failed.
    #[error("post-processor {id:?} failed: {detail}")]
    PostProcessorRun {
        /// The failing plug-in's id.
        id: String,
        /// A human-readable detail string.
        detail: String,
    },
}

// ── Trait: PreProcessor ──────────────────────────────────────────────

/// A plug-in that rewrites a [`Request`] before it is sent to the PDP.
pub trait PreProcessor: Send + Sync {
    /// A stable identifier for this plug-in, used only in logs.
    fn id(&self) -> &str;

    /// Called once before the plug-in is used. The default does nothing.
    fn init(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Rewrite `request` in place.
    fn process(&self, request: &mut Request) -> Result<(), PluginError>;

    /// Called once when the plug-in is retired. The default does nothing.
    fn destroy(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}

// ── Trait: PostProcessor ─────────────────────────────────────────────

/// A plug-in that rewrites a [`Response`] after it is received from the
/// PDP, in light of the effective `Request` that produced it.
pub trait PostProcessor: Send + Sync {
    /// A stable identifier for this plug-in, used only in logs.
    fn id(&self) -> &str;

    /// Called once before the plug-in is used. The default does nothing.
    fn init(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Rewrite `response` in place given the request that produced it.
    fn process(&self, request: &Request, response: &mut Response) -> Result<(), PluginError>;

    /// Called once when the plug-in is retired. The default does nothing.
    fn destroy(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}

// ── PreProcessorChain ────────────────────────────────────────────────

/// An ordered chain of [`PreProcessor`]s, run in registration order.
#[derive(Default)]
pub struct PreProcessorChain {
    stages: Vec<Box<dyn PreProcessor>>,
}

impl PreProcessorChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a pre-processor to the end of the chain.
    pub fn register(&mut self, stage: Box<dyn PreProcessor>) {
        self.stages.push(stage);
    }

    /// Returns the number of registered pre-processors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no pre-processors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Call `init` on every stage in order, short-circuiting on first error.
    pub fn init_all(&mut self) -> Result<(), PluginError> {
        for stage in &mut self.stages {
            stage.init().map_err(|e| match e {
                PluginError::PreProcessorInit { .. } => e,
                other => PluginError::PreProcessorInit {
                    id: stage.id().to_string(),
                    detail: other.to_string(),
                },
            })?;
        }
        Ok(())
    }

    /// Call `process` on every stage in order, short-circuiting on first
    /// error.
    pub fn run(&self, request: &mut Request) -> Result<(), PluginError> {
        for stage in &self.stages {
            stage.process(request).map_err(|e| match e {
                PluginError::PreProcessorRun { .. } => e,
                other => PluginError::PreProcessorRun {
                    id: stage.id().to_string(),
                    detail: other.to_string(),
                },
            })?;
        }
        Ok(())
    }

    /// Call `destroy` on every stage in registration order. Collects the
    /// first error but still calls `destroy` on every stage.
    pub fn destroy_all(&mut self) -> Result<(), PluginError> {
        let mut first_err = None;
        for stage in &mut self.stages {
            if let Err(e) = stage.destroy() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── PostProcessorChain ───────────────────────────────────────────────

/// An ordered chain of [`PostProcessor`]s, run in registration order.
#[derive(Default)]
pub struct PostProcessorChain {
    stages: Vec<Box<dyn PostProcessor>>,
}

impl PostProcessorChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a post-processor to the end of the chain.
    pub fn register(&mut self, stage: Box<dyn PostProcessor>) {
        self.stages.push(stage);
    }

    /// Returns the number of registered post-processors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no post-processors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Call `init` on every stage in order, short-circuiting on first error.
    pub fn init_all(&mut self) -> Result<(), PluginError> {
        for stage in &mut self.stages {
            stage.init().map_err(|e| match e {
                PluginError::PostProcessorInit { .. } => e,
                other => PluginError::PostProcessorInit {
                    id: stage.id().to_string(),
                    detail: other.to_string(),
                },
            })?;
        }
        Ok(())
    }

    /// Call `process` on every stage in order, short-circuiting on first
    /// error.
    pub fn run(&self, request: &Request, response: &mut Response) -> Result<(), PluginError> {
        for stage in &self.stages {
            stage.process(request, response).map_err(|e| match e {
                PluginError::PostProcessorRun { .. } => e,
                other => PluginError::PostProcessorRun {
                    id: stage.id().to_string(),
                    detail: other.to_string(),
                },
            })?;
        }
        Ok(())
    }

    /// Call `destroy` on every stage in registration order. Collects the
    /// first error but still calls `destroy` on every stage.
    pub fn destroy_all(&mut self) -> Result<(), PluginError> {
        let mut first_err = None;
        for stage in &mut self.stages {
            if let Err(e) = stage.destroy() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OrderTrackingPre {
        name: &'static str,
        log: std::sync::Arc<std::sync::Mutex<Vec<&'static str>>>,
    }

    impl PreProcessor for OrderTrackingPre {
        fn id(&self) -> &str {
            self.name
        }

        fn process(&self, _request: &mut Request) -> Result<(), PluginError> {
            self.log.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    struct FailingPre;

    impl PreProcessor for FailingPre {
        fn id(&self) -> &str {
            "failing"
        }

        fn process(&self, _request: &mut Request) -> Result<(), PluginError> {
            Err(PluginError::PreProcessorRun {
                id: "failing".to_string(),
                detail: "boom".to_string(),
            })
        }
    }

    struct NeverCalledPre(std::sync::Arc<std::sync::Mutex<bool>>);

    impl PreProcessor for NeverCalledPre {
        fn id(&self) -> &str {
            "never-called"
        }

        fn process(&self, _request: &mut Request) -> Result<(), PluginError> {
            *self.0.lock().unwrap() = true;
            Ok(())
        }
    }

    #[test]
    fn chain_preserves_registration_order() {
        let log = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut chain = PreProcessorChain::new();
        chain.register(Box::new(OrderTrackingPre {
            name: "first",
            log: log.clone(),
        }));
        chain.register(Box::new(OrderTrackingPre {
            name: "second",
            log: log.clone(),
        }));
        let mut request = Request::default();
        chain.run(&mut request).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn chain_short_circuits_on_first_error() {
        let called = std::sync::Arc::new(std::sync::Mutex::new(false));
        let mut chain = PreProcessorChain::new();
        chain.register(Box::new(FailingPre));
        chain.register(Box::new(NeverCalledPre(called.clone())));
        let mut request = Request::default();
        let err = chain.run(&mut request).unwrap_err();
        assert!(matches!(err, PluginError::PreProcessorRun { .. }));
        assert!(!*called.lock().unwrap());
    }

    #[test]
    fn empty_chain_is_a_passthrough() {
        let chain = PreProcessorChain::new();
        assert!(chain.is_empty());
        let mut request = Request::default();
        assert!(chain.run(&mut request).is_ok());
    }
}
