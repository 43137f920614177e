//! Recording engine for adapter tests.

use ragtool_core::{AppError, AppResult};
use ragtool_engine::{AddRequest, BuildEngine, EngineConfig, RagEngine, WhereFilter};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct QueryCall {
    pub question: String,
    pub filter: Option<WhereFilter>,
}

/// Records every call and answers with a canned response.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    pub built_with: Option<EngineConfig>,
    response: String,
    failure: Option<String>,
    adds: Arc<Mutex<Vec<AddRequest>>>,
    queries: Arc<Mutex<Vec<QueryCall>>>,
}

impl RecordingEngine {
    pub fn responding(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn adds(&self) -> Vec<AddRequest> {
        self.adds.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<QueryCall> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> QueryCall {
        self.queries().pop().expect("no query recorded")
    }

    fn check(&self) -> AppResult<()> {
        match self.failure {
            Some(ref message) => Err(AppError::Engine(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl RagEngine for RecordingEngine {
    async fn add(&self, request: AddRequest) -> AppResult<()> {
        self.check()?;
        self.adds.lock().unwrap().push(request);
        Ok(())
    }

    async fn query(&self, question: &str, filter: Option<&WhereFilter>) -> AppResult<String> {
        self.check()?;
        self.queries.lock().unwrap().push(QueryCall {
            question: question.to_string(),
            filter: filter.cloned(),
        });
        Ok(self.response.clone())
    }
}

impl BuildEngine for RecordingEngine {
    fn build(config: EngineConfig) -> AppResult<Self> {
        Ok(Self {
            built_with: Some(config),
            ..Default::default()
        })
    }
}
