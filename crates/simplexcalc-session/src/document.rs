use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use simplexcalc_solver::{
    Direction, LpModel, ModelError, ObjectiveFunction, Relation, SolutionSet,
};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read or write model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document declares {declared} variables but the objective has {found} coefficients")]
    VariableCount { declared: usize, found: usize },
    #[error("document declares {declared} constraints but contains {found}")]
    ConstraintCount { declared: usize, found: usize },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// On-disk model file. Field names follow the persisted layout the
/// front-end reads and writes, including the capitalized `Variables` key
/// inside solution records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument {
    pub num_variables: usize,
    pub num_constraints: usize,
    pub objective_function: ObjectiveDocument,
    pub constraints: Vec<ConstraintDocument>,
    /// Absent in files written before the first solve
    #[serde(default)]
    pub solutions: Vec<SolutionDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectiveDocument {
    pub coefficients: Vec<f64>,
    /// "Maximize" or "Minimize"
    pub optimization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintDocument {
    pub coefficients: Vec<f64>,
    /// One of "<", "<=", "=", ">=", ">"
    pub symbol: String,
    pub constant: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolutionDocument {
    #[serde(rename = "Variables")]
    pub variables: Vec<f64>,
    pub objective_value: f64,
}

impl ModelDocument {
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Builds the in-memory model, checking the declared counts and the
    /// direction/relation tokens. Strict relations are normalized by the
    /// model layer on the way in.
    pub fn to_model(&self) -> Result<LpModel, DocumentError> {
        let direction: Direction = self.objective_function.optimization.parse()?;
        if self.objective_function.coefficients.len() != self.num_variables {
            return Err(DocumentError::VariableCount {
                declared: self.num_variables,
                found: self.objective_function.coefficients.len(),
            });
        }
        if self.constraints.len() != self.num_constraints {
            return Err(DocumentError::ConstraintCount {
                declared: self.num_constraints,
                found: self.constraints.len(),
            });
        }

        let mut model = LpModel::new(ObjectiveFunction::new(
            self.objective_function.coefficients.clone(),
            direction,
        ));
        for constraint in &self.constraints {
            let relation: Relation = constraint.symbol.parse()?;
            model.add_constraint(
                constraint.coefficients.clone(),
                relation,
                constraint.constant,
            )?;
        }
        Ok(model)
    }

    /// The solution history stored in the file, in recorded order.
    pub fn to_solution_set(&self) -> SolutionSet {
        let mut set = SolutionSet::new();
        for solution in &self.solutions {
            set.add_solution(solution.objective_value, solution.variables.clone());
        }
        set
    }

    /// Renders session state back to the persisted layout. Constraints come
    /// out already normalized, so only non-strict symbols are written.
    pub fn from_state(model: &LpModel, solutions: &SolutionSet) -> Self {
        Self {
            num_variables: model.num_variables(),
            num_constraints: model.num_constraints(),
            objective_function: ObjectiveDocument {
                coefficients: model.objective.coefficients.clone(),
                optimization: model.objective.direction.to_string(),
            },
            constraints: model
                .constraints
                .iter()
                .map(|c| ConstraintDocument {
                    coefficients: c.coefficients.clone(),
                    symbol: c.relation.to_string(),
                    constant: c.constant,
                })
                .collect(),
            solutions: solutions
                .iter()
                .map(|s| SolutionDocument {
                    variables: s.variable_values.clone(),
                    objective_value: s.objective_value,
                })
                .collect(),
        }
    }
}
