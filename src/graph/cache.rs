//! Per-session cache of step graphs, indexed by step position.
//!
//! Graphs are built on first request and kept until [`StepGraphCache::evict`]
//! or until the cache is dropped with its session. Each slot only ever holds
//! the pure output of [`build_graph`] for that step.

use super::builder::build_graph;
use super::model::StepGraph;
use crate::parser::ExecutionTrace;
use crate::utils::error::GraphError;
use log::debug;

#[derive(Debug, Clone)]
pub struct StepGraphCache {
    trace: ExecutionTrace,
    graphs: Vec<Option<StepGraph>>,
}

impl StepGraphCache {
    pub fn new(trace: ExecutionTrace) -> Self {
        let graphs = vec![None; trace.steps.len()];
        Self { trace, graphs }
    }

    pub fn trace(&self) -> &ExecutionTrace {
        &self.trace
    }

    /// Number of steps in the trace
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn is_cached(&self, index: usize) -> bool {
        matches!(self.graphs.get(index), Some(Some(_)))
    }

    /// Graph for step `index`, building it on first access
    ///
    /// # Errors
    /// * `GraphError::StepOutOfRange` - `index` is past the last step
    pub fn get(&mut self, index: usize) -> Result<&StepGraph, GraphError> {
        let len = self.graphs.len();
        let steps = &self.trace.steps;

        let slot = self
            .graphs
            .get_mut(index)
            .ok_or(GraphError::StepOutOfRange { index, len })?;

        Ok(&*slot.get_or_insert_with(|| {
            debug!("Building graph for step {}", index);
            build_graph(&steps[index])
        }))
    }

    /// Cache position of the step at wire position `step_index`
    pub fn position_of(&self, step_index: usize) -> Option<usize> {
        self.trace
            .steps
            .iter()
            .position(|step| step.index == step_index)
    }

    /// Graph for the step at wire position `step_index`
    ///
    /// # Errors
    /// * `GraphError::StepNotFound` - no parsed step came from that position
    pub fn get_by_step_index(&mut self, step_index: usize) -> Result<&StepGraph, GraphError> {
        let index = self
            .position_of(step_index)
            .ok_or(GraphError::StepNotFound { step_index })?;
        self.get(index)
    }

    /// Build every step not yet cached
    pub fn build_all(&mut self) {
        for (slot, step) in self.graphs.iter_mut().zip(&self.trace.steps) {
            if slot.is_none() {
                *slot = Some(build_graph(step));
            }
        }
    }

    /// Cached graphs in step order
    pub fn graphs(&self) -> impl Iterator<Item = &StepGraph> {
        self.graphs.iter().flatten()
    }

    /// Drop every cached graph
    pub fn evict(&mut self) {
        debug!("Evicting {} cached step graphs", self.graphs.len());
        self.graphs.iter_mut().for_each(|slot| *slot = None);
    }

    /// Consume the cache, building any missing graphs
    pub fn into_graphs(mut self) -> Vec<StepGraph> {
        self.build_all();
        self.graphs.into_iter().flatten().collect()
    }
}
