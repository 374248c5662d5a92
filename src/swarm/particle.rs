use crate::{
    error::Result,
    model::Model,
    population::Fitness,
    rng::RandomNumberGenerator,
    scoring::{CalculateScore, ScoreDirection},
};

/// The numeric settings one velocity update needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Coefficients {
    pub inertia: f64,
    pub c1: f64,
    pub c2: f64,
    pub max_velocity: Option<f64>,
    pub max_position: Option<f64>,
}

/// One member of a swarm. Its position is the parameter vector of the model it owns.
#[derive(Debug, Clone)]
pub struct Particle<M: Model> {
    model: M,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_score: f64,
    fitness: Fitness,
}

impl<M: Model> Particle<M> {
    /// Wraps `model` with a zero velocity. The personal best starts at the model's
    /// current position, with no score.
    pub fn new(model: M) -> Self {
        let best_position = model.parameters().to_vec();
        Self {
            velocity: vec![0.0; best_position.len()],
            best_position,
            best_score: f64::NAN,
            fitness: Fitness::Unscored,
            model,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn position(&self) -> &[f64] {
        self.model.parameters()
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Score of the personal best. NaN until the particle has been scored successfully.
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    pub(crate) fn mark_failed(&mut self, message: impl Into<String>) {
        self.fitness = Fitness::Failed(message.into());
    }

    /// Draws every velocity component uniformly from `[-max_velocity, max_velocity]`, or
    /// zeroes it when velocity is unbounded.
    pub(crate) fn randomize_velocity(
        &mut self,
        max_velocity: Option<f64>,
        rng: &mut RandomNumberGenerator,
    ) {
        for v in &mut self.velocity {
            *v = max_velocity.map_or(0.0, |bound| rng.next_symmetric(bound));
        }
    }

    /// Moves the particle one step towards its own best and `global_best`.
    pub(crate) fn step(
        &mut self,
        global_best: &[f64],
        coefficients: Coefficients,
        rng: &mut RandomNumberGenerator,
    ) {
        let len = self.velocity.len();
        let position = self.model.parameters_mut();

        for i in 0..len {
            let r1 = rng.next_unit();
            let r2 = rng.next_unit();
            let x = position[i];

            let mut v = coefficients.inertia * self.velocity[i]
                + coefficients.c1 * r1 * (self.best_position[i] - x)
                + coefficients.c2 * r2 * (global_best[i] - x);
            if let Some(bound) = coefficients.max_velocity {
                v = v.clamp(-bound, bound);
            }
            self.velocity[i] = v;

            let mut x = x + v;
            if let Some(bound) = coefficients.max_position {
                x = x.clamp(-bound, bound);
            }
            position[i] = x;
        }

        self.model.refresh();
    }

    /// Scores the current position and adopts it as the personal best if it is strictly
    /// better.
    pub(crate) fn evaluate<S: CalculateScore<M>>(
        &mut self,
        score: &S,
        direction: ScoreDirection,
    ) -> Result<()> {
        match score.calculate_score(&mut self.model) {
            Ok(value) => {
                self.fitness = Fitness::Scored(value);
                if direction.is_better(value, self.best_score) {
                    self.best_score = value;
                    self.best_position.copy_from_slice(self.model.parameters());
                }
                Ok(())
            }
            Err(err) => {
                self.mark_failed(err.to_string());
                Err(err)
            }
        }
    }
}
