use std::path::Path;

use simplexcalc_solver::{LpModel, Solution, SolutionSet, SolveError, Solver};

use crate::document::{DocumentError, ModelDocument};

/// One editing-and-solving session: the current model plus the append-only
/// history of its solutions. Replaces the front-end's ambient state with a
/// value the presentation layer holds and queries.
pub struct Session {
    model: LpModel,
    history: SolutionSet,
    solver: Solver,
}

impl Session {
    pub fn new(model: LpModel) -> Self {
        Self {
            model,
            history: SolutionSet::new(),
            solver: Solver::new(),
        }
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    pub fn model(&self) -> &LpModel {
        &self.model
    }

    /// Edits and solves must not interleave; the session is single-threaded
    /// and a solve runs to completion before the next edit.
    pub fn model_mut(&mut self) -> &mut LpModel {
        &mut self.model
    }

    pub fn history(&self) -> &SolutionSet {
        &self.history
    }

    /// Solves the current model. A success is appended to the history and
    /// returned; a failure leaves the history untouched.
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        let solution = self.solver.solve(&self.model)?;
        self.history
            .add_solution(solution.objective_value, solution.variable_values.clone());
        Ok(solution)
    }

    /// The "New" action: drop the model contents and the history.
    pub fn clear(&mut self) {
        self.model.clear();
        self.history.clear();
    }

    /// Replaces the model and starts the history over.
    pub fn reset(&mut self, model: LpModel) {
        self.model = model;
        self.history.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn from_document(document: &ModelDocument) -> Result<Self, DocumentError> {
        let model = document.to_model()?;
        let history = document.to_solution_set();
        Ok(Self {
            model,
            history,
            solver: Solver::new(),
        })
    }

    pub fn to_document(&self) -> ModelDocument {
        ModelDocument::from_state(&self.model, &self.history)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::from_document(&ModelDocument::load(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        self.to_document().save(path)
    }
}
