use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the one-off temperature reading a cell receives when it is created.
pub trait TemperatureSource {
    fn sample(&mut self) -> f64;
}

/// Uniform draw over a half-open range, rounded to one decimal.
///
/// The rounded value always stays inside `[low, high)`. A draw that rounds up to
/// `high` is moved to the step below it, so that top step is about 1.5 times as
/// likely as its neighbours (39.9 with the default `[25, 40)` range).
pub struct SeededTemperature {
    rng: StdRng,
    low: f64,
    high: f64,
}

impl SeededTemperature {
    pub fn new(seed: u64, range: (f64, f64)) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            low: range.0,
            high: range.1,
        }
    }
}

impl TemperatureSource for SeededTemperature {
    fn sample(&mut self) -> f64 {
        let raw = self.rng.gen_range(self.low..self.high);
        let mut step = (raw * 10.0).round();
        if step / 10.0 >= self.high {
            step -= 1.0;
        }
        if step / 10.0 < self.low {
            step += 1.0;
        }
        let rounded = step / 10.0;
        // ranges narrower than one step are rejected by config validation
        if rounded >= self.low && rounded < self.high {
            rounded
        } else {
            raw
        }
    }
}

// A scripted source backed by a closure, e.g. a fixed list of readings.
pub struct ScriptedTemperature<F>
where
    F: FnMut() -> f64,
{
    pub sample_fn: F,
}

impl<F> TemperatureSource for ScriptedTemperature<F>
where
    F: FnMut() -> f64,
{
    fn sample(&mut self) -> f64 {
        (self.sample_fn)()
    }
}

/// Replays `values` in order, repeating the last one once exhausted.
pub fn scripted(values: Vec<f64>) -> ScriptedTemperature<impl FnMut() -> f64> {
    let mut index = 0;
    ScriptedTemperature {
        sample_fn: move || {
            let value = values
                .get(index)
                .or_else(|| values.last())
                .copied()
                .unwrap_or(25.0);
            index += 1;
            value
        },
    }
}
