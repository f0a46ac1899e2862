use std::collections::HashMap;

// Sensor features are unnormalized (proximity runs to 50, temperature to
// 35); the step size must stay below 2 / sum(x^2) or SGD oscillates.
const LEARNING_RATE: f64 = 1e-4;

/// Online linear regression over the sensor map, predicting the safety
/// score, with a running mean absolute error.
///
/// Purely observational: its only outputs are the feedback status string
/// and the mission log's error column. Nothing in the decision path reads
/// it.
pub struct SafetyModel {
    weights: HashMap<String, f64>,
    bias: f64,
    abs_error_sum: f64,
    steps: u64,
}

impl SafetyModel {
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
            bias: 0.0,
            abs_error_sum: 0.0,
            steps: 0,
        }
    }

    pub fn predict(&self, features: &HashMap<String, f64>) -> f64 {
        let mut y = self.bias;
        for (name, x) in features {
            y += self.weights.get(name).copied().unwrap_or(0.0) * x;
        }
        y
    }

    /// One SGD step on (features -> target), then scores the updated model
    /// against the same sample and folds the error into the running MAE.
    /// Returns the post-update prediction.
    pub fn learn(&mut self, features: &HashMap<String, f64>, target: f64) -> f64 {
        let error = self.predict(features) - target;
        for (name, x) in features {
            let w = self.weights.entry(name.clone()).or_insert(0.0);
            *w -= LEARNING_RATE * error * x;
        }
        self.bias -= LEARNING_RATE * error;

        let prediction = self.predict(features);
        self.abs_error_sum += (target - prediction).abs();
        self.steps += 1;
        prediction
    }

    pub fn mae(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.abs_error_sum / self.steps as f64
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn status(&self) -> String {
        format!("Learning: MAE={:.4} | Steps={}", self.mae(), self.steps)
    }
}

impl Default for SafetyModel {
    fn default() -> Self {
        Self::new()
    }
}
