use thiserror::Error;

use crate::model::{Direction, LpModel, ModelError};
use crate::solution::Solution;
use crate::tableau::Tableau;

/// A solve that did not produce an optimum. Failed solves never record
/// anything; the caller's solution history is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("malformed model: {0}")]
    Malformed(#[from] ModelError),
    #[error("the problem is unbounded")]
    Unbounded,
    #[error("the problem has no feasible solution")]
    Infeasible,
    #[error("no optimum after {0} pivots; the model may be degenerate")]
    IterationLimit(usize),
}

enum SimplexResult {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
}

/// Simplex solver over a dense tableau.
///
/// There is no Phase-1/Big-M procedure: the initial basis is taken from the
/// slack columns as-is, so models with `>=` or `=` constraints may start
/// from an infeasible basis and end in a wrong terminal state. The
/// iteration cap is the only guard against cycling on degenerate models.
pub struct Solver {
    /// Pivots allowed before the solve is abandoned
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Runs the pivot loop to a terminal state and extracts the optimum.
    /// Synchronous; the tableau lives and dies inside this call.
    pub fn solve(&self, model: &LpModel) -> Result<Solution, SolveError> {
        model.validate()?;
        let mut tableau = Tableau::from_model(model);
        match self.run(&mut tableau) {
            SimplexResult::Optimal => {
                Ok(self.extract(&tableau, model.objective.direction))
            }
            SimplexResult::Unbounded => Err(SolveError::Unbounded),
            SimplexResult::Infeasible => Err(SolveError::Infeasible),
            SimplexResult::IterationLimit => {
                Err(SolveError::IterationLimit(self.max_iterations))
            }
        }
    }

    fn run(&self, tableau: &mut Tableau) -> SimplexResult {
        for _ in 0..self.max_iterations {
            let Some(pivot_col) = self.pivot_column(tableau) else {
                // No improving column left. A negative RHS at this point
                // means the basis never became feasible.
                return if self.has_negative_rhs(tableau) {
                    SimplexResult::Infeasible
                } else {
                    SimplexResult::Optimal
                };
            };
            let Some(pivot_row) = self.pivot_row(tableau, pivot_col) else {
                return SimplexResult::Unbounded;
            };
            tableau.pivot(pivot_row, pivot_col);
        }
        SimplexResult::IterationLimit
    }

    /// Most negative objective-row entry, ties broken by lowest column.
    fn pivot_column(&self, tableau: &Tableau) -> Option<usize> {
        let mut best_value = -self.tolerance;
        let mut best_col = None;
        for j in 0..tableau.rhs_col() {
            let value = tableau.get(0, j);
            if value < best_value {
                best_value = value;
                best_col = Some(j);
            }
        }
        best_col
    }

    /// Minimum-ratio test over rows with a strictly positive pivot-column
    /// entry, ties broken by lowest row.
    fn pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let rhs_col = tableau.rhs_col();
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;
        for i in 1..tableau.rows() {
            let entry = tableau.get(i, col);
            if entry > self.tolerance {
                let ratio = tableau.get(i, rhs_col) / entry;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }
        min_row
    }

    fn has_negative_rhs(&self, tableau: &Tableau) -> bool {
        let rhs_col = tableau.rhs_col();
        (1..tableau.rows()).any(|i| tableau.get(i, rhs_col) < -self.tolerance)
    }

    /// Reads variable values out of the unit columns and the objective
    /// value out of the corner cell, undoing the sign convention for
    /// minimization.
    fn extract(&self, tableau: &Tableau, direction: Direction) -> Solution {
        let rhs_col = tableau.rhs_col();
        let mut values = vec![0.0; tableau.num_variables()];
        for (j, value) in values.iter_mut().enumerate() {
            if let Some(row) = tableau.basic_row(j, self.tolerance) {
                *value = tableau.get(row, rhs_col);
            }
        }

        let corner = tableau.get(0, rhs_col);
        let objective_value = match direction {
            Direction::Maximize => corner,
            Direction::Minimize => -corner,
        };

        Solution::new(objective_value, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, LpModel, ObjectiveFunction, Relation};

    fn satisfies(model: &LpModel, values: &[f64]) -> bool {
        model.constraints.iter().all(|c| {
            let lhs: f64 = c
                .coefficients
                .iter()
                .zip(values)
                .map(|(a, x)| a * x)
                .sum();
            match c.relation {
                Relation::Le | Relation::Lt => lhs <= c.constant + 1e-6,
                Relation::Ge | Relation::Gt => lhs >= c.constant - 1e-6,
                Relation::Eq => (lhs - c.constant).abs() <= 1e-6,
            }
        })
    }

    fn recomputed_objective(model: &LpModel, values: &[f64]) -> f64 {
        model
            .objective
            .coefficients
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum()
    }

    #[test]
    fn test_single_variable_upper_bound() {
        // Maximize x1 subject to x1 <= 10; optimum x1 = 10
        let mut model = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        model.add_constraint(vec![1.0], Relation::Le, 10.0).unwrap();

        let solution = Solver::new().solve(&model).unwrap();

        assert!((solution.objective_value - 10.0).abs() < 1e-6);
        assert!((solution.variable_values[0] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_two_variable_maximization() {
        // Maximize 3x + 2y subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=11
        let mut model =
            LpModel::new(ObjectiveFunction::new(vec![3.0, 2.0], Direction::Maximize));
        model.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0).unwrap();
        model.add_constraint(vec![1.0, 0.0], Relation::Le, 3.0).unwrap();
        model.add_constraint(vec![0.0, 1.0], Relation::Le, 3.0).unwrap();

        let solution = Solver::new().solve(&model).unwrap();

        assert!((solution.objective_value - 11.0).abs() < 1e-6);
        assert!((solution.variable_values[0] - 3.0).abs() < 1e-6);
        assert!((solution.variable_values[1] - 1.0).abs() < 1e-6);
        assert!(satisfies(&model, &solution.variable_values));
    }

    #[test]
    fn test_two_variable_minimization() {
        // Minimize -3x - 2y under the same bounds; optimum is -11 at (3, 1)
        let mut model =
            LpModel::new(ObjectiveFunction::new(vec![-3.0, -2.0], Direction::Minimize));
        model.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0).unwrap();
        model.add_constraint(vec![1.0, 0.0], Relation::Le, 3.0).unwrap();
        model.add_constraint(vec![0.0, 1.0], Relation::Le, 3.0).unwrap();

        let solution = Solver::new().solve(&model).unwrap();

        assert!((solution.objective_value + 11.0).abs() < 1e-6);
        assert!((solution.variable_values[0] - 3.0).abs() < 1e-6);
        assert!((solution.variable_values[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_objective_matches_recomputation() {
        let mut model =
            LpModel::new(ObjectiveFunction::new(vec![2.0, 5.0], Direction::Maximize));
        model.add_constraint(vec![1.0, 2.0], Relation::Le, 8.0).unwrap();
        model.add_constraint(vec![3.0, 1.0], Relation::Le, 9.0).unwrap();

        let solution = Solver::new().solve(&model).unwrap();

        let recomputed = recomputed_objective(&model, &solution.variable_values);
        assert!((solution.objective_value - recomputed).abs() < 1e-6);
        assert!(satisfies(&model, &solution.variable_values));
    }

    #[test]
    fn test_unbounded() {
        // Maximize x1 with only a lower bound; x1 can grow without limit
        let mut model = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        model.add_constraint(vec![1.0], Relation::Ge, 5.0).unwrap();

        assert_eq!(Solver::new().solve(&model), Err(SolveError::Unbounded));
    }

    #[test]
    fn test_infeasible_negative_rhs() {
        // x1 <= -2 cannot hold for x1 >= 0; the contradiction surfaces as a
        // negative RHS after pivoting
        let mut model = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        model.add_constraint(vec![1.0], Relation::Le, -2.0).unwrap();

        assert_eq!(Solver::new().solve(&model), Err(SolveError::Infeasible));
    }

    #[test]
    fn test_ge_lower_bound_missed_without_artificial_basis() {
        // Minimize x1 subject to x1 >= 5. With no artificial variables the
        // surplus column cannot seed a feasible basis, the loop stops
        // immediately, and the solve reports an "optimum" of 0 that violates
        // the constraint. Recorded as-is: this is the observed behavior of
        // the missing feasibility phase, not a correct answer.
        let mut model = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Minimize));
        model.add_constraint(vec![1.0], Relation::Ge, 5.0).unwrap();

        let solution = Solver::new().solve(&model).unwrap();

        assert!((solution.objective_value - 0.0).abs() < 1e-6);
        assert!((solution.variable_values[0] - 0.0).abs() < 1e-6);
        assert!(!satisfies(&model, &solution.variable_values));
    }

    #[test]
    fn test_strict_bound_matches_nudged_bound() {
        // x1 < 5 must solve identically to x1 <= 4.999999
        let mut strict = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        strict.add_constraint(vec![1.0], Relation::Lt, 5.0).unwrap();

        let mut nudged = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        nudged
            .add_constraint(vec![1.0], Relation::Le, 4.999999)
            .unwrap();

        let solver = Solver::new();
        let a = solver.solve(&strict).unwrap();
        let b = solver.solve(&nudged).unwrap();

        assert!((a.objective_value - b.objective_value).abs() < 1e-6);
        assert!((a.variable_values[0] - b.variable_values[0]).abs() < 1e-6);
    }

    #[test]
    fn test_iteration_limit_is_reported() {
        // One pivot is spent reaching the optimum, so a cap of 1 leaves no
        // iteration to detect it
        let mut model = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        model.add_constraint(vec![1.0], Relation::Le, 10.0).unwrap();

        let capped = Solver::new().with_max_iterations(1);
        assert_eq!(capped.solve(&model), Err(SolveError::IterationLimit(1)));

        assert!(Solver::new().solve(&model).is_ok());
    }

    #[test]
    fn test_malformed_model_is_rejected_before_solving() {
        let model = LpModel::new(ObjectiveFunction::new(vec![1.0], Direction::Maximize));
        assert_eq!(
            Solver::new().solve(&model),
            Err(SolveError::Malformed(ModelError::NoConstraints))
        );
    }
}
