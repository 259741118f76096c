use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Margin used to approximate a strict inequality by a non-strict one.
/// `x < b` is stored as `x <= b - MARGIN`, `x > b` as `x >= b + MARGIN`.
/// This excludes the boundary instead of solving strictness exactly; models
/// whose optimum depends on values closer than the margin will be off by it.
pub const STRICT_MARGIN: f64 = 1e-6;

/// Whether the objective is to be maximized or minimized
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl FromStr for Direction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Maximize" => Ok(Direction::Maximize),
            "Minimize" => Ok(Direction::Minimize),
            _ => Err(ModelError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Maximize => write!(f, "Maximize"),
            Direction::Minimize => write!(f, "Minimize"),
        }
    }
}

/// Comparison relation between a constraint's left-hand side and its constant
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Strictly less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Equal (=)
    Eq,
    /// Greater than or equal (>=)
    Ge,
    /// Strictly greater than (>)
    Gt,
}

impl FromStr for Relation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Relation::Lt),
            "<=" => Ok(Relation::Le),
            "=" => Ok(Relation::Eq),
            ">=" => Ok(Relation::Ge),
            ">" => Ok(Relation::Gt),
            _ => Err(ModelError::UnknownRelation(s.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Lt => write!(f, "<"),
            Relation::Le => write!(f, "<="),
            Relation::Eq => write!(f, "="),
            Relation::Ge => write!(f, ">="),
            Relation::Gt => write!(f, ">"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("constraint {index} has {found} coefficients, expected {expected}")]
    CoefficientCount {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown relation symbol: {0}")]
    UnknownRelation(String),
    #[error("unknown optimization direction: {0}")]
    UnknownDirection(String),
    #[error("objective function has no coefficients")]
    EmptyObjective,
    #[error("model has no constraints")]
    NoConstraints,
    #[error("model contains a non-finite number")]
    NonFinite,
}

/// Objective function of a linear program
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveFunction {
    /// Coefficients for each decision variable, index = variable id
    pub coefficients: Vec<f64>,
    pub direction: Direction,
}

impl ObjectiveFunction {
    pub fn new(coefficients: Vec<f64>, direction: Direction) -> Self {
        Self { coefficients, direction }
    }
}

/// One linear constraint, already normalized to a non-strict relation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintEquation {
    /// Coefficients aligned to the objective's variable ids
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    /// Right-hand side, nudged by the strictness margin where applicable
    pub constant: f64,
}

impl ConstraintEquation {
    /// Builds a constraint, converting strict relations to non-strict ones
    /// by excluding an epsilon margin around the boundary.
    pub fn new(coefficients: Vec<f64>, relation: Relation, constant: f64) -> Self {
        let (relation, constant) = match relation {
            Relation::Lt => (Relation::Le, constant - STRICT_MARGIN),
            Relation::Gt => (Relation::Ge, constant + STRICT_MARGIN),
            other => (other, constant),
        };
        Self { coefficients, relation, constant }
    }
}

/// A linear program: one objective plus an ordered list of constraints.
/// Constraint insertion order fixes the tableau row order.
#[derive(Debug, Clone, PartialEq)]
pub struct LpModel {
    pub objective: ObjectiveFunction,
    pub constraints: Vec<ConstraintEquation>,
}

impl LpModel {
    pub fn new(objective: ObjectiveFunction) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }

    /// Appends a constraint. Fails if its coefficient count does not match
    /// the number of decision variables fixed by the objective.
    pub fn add_constraint(
        &mut self,
        coefficients: Vec<f64>,
        relation: Relation,
        constant: f64,
    ) -> Result<(), ModelError> {
        if coefficients.len() != self.num_variables() {
            return Err(ModelError::CoefficientCount {
                index: self.constraints.len(),
                expected: self.num_variables(),
                found: coefficients.len(),
            });
        }
        self.constraints
            .push(ConstraintEquation::new(coefficients, relation, constant));
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.objective.coefficients.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Empties the model so it can be re-populated for the next solve cycle.
    pub fn clear(&mut self) {
        self.objective.coefficients.clear();
        self.constraints.clear();
    }

    /// Checks the invariants a solve relies on: at least one variable and
    /// one constraint, matching coefficient counts, finite numbers only.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_variables() == 0 {
            return Err(ModelError::EmptyObjective);
        }
        if self.constraints.is_empty() {
            return Err(ModelError::NoConstraints);
        }
        if !self.objective.coefficients.iter().all(|c| c.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        for (index, constraint) in self.constraints.iter().enumerate() {
            if constraint.coefficients.len() != self.num_variables() {
                return Err(ModelError::CoefficientCount {
                    index,
                    expected: self.num_variables(),
                    found: constraint.coefficients.len(),
                });
            }
            if !constraint.coefficients.iter().all(|c| c.is_finite())
                || !constraint.constant.is_finite()
            {
                return Err(ModelError::NonFinite);
            }
        }
        Ok(())
    }
}

impl fmt::Display for LpModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective Function:")?;
        writeln!(f, "Coefficients: {:?}", self.objective.coefficients)?;
        writeln!(f, "Optimization Type: {}", self.objective.direction)?;
        writeln!(f, "Constraints:")?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            writeln!(f, "Constraint {}:", i + 1)?;
            writeln!(f, "Coefficients: {:?}", constraint.coefficients)?;
            writeln!(f, "Sign: {}", constraint.relation)?;
            writeln!(f, "Constant: {}", constraint.constant)?;
        }
        Ok(())
    }
}
