//! 披萨估算：根据人数和食量推荐披萨数量及口味分配。
//!
//! Pizza estimator.
//!
//! Maps a head count and an appetite level to a recommended number of pizzas
//! and a topping distribution. Pure arithmetic, no side effects.
//!
//! ```rust
//! use pizza_agent::pizza::estimate;
//!
//! let order = estimate(10, "heavy").unwrap();
//! assert_eq!(order.pizza_count, 5);
//! assert_eq!(order.slices_per_person, 4.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorContext, Result};

/// How hungry the group is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppetiteLevel {
    Light,
    #[default]
    Normal,
    Heavy,
}

impl AppetiteLevel {
    pub const ALL: [AppetiteLevel; 3] = [AppetiteLevel::Light, AppetiteLevel::Normal, AppetiteLevel::Heavy];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppetiteLevel::Light => "light",
            AppetiteLevel::Normal => "normal",
            AppetiteLevel::Heavy => "heavy",
        }
    }
}

impl fmt::Display for AppetiteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppetiteLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(AppetiteLevel::Light),
            "normal" => Ok(AppetiteLevel::Normal),
            "heavy" => Ok(AppetiteLevel::Heavy),
            _ => Err(Error::invalid_argument_with_context(
                format!("unknown appetite level '{s}', expected one of light, normal, heavy"),
                ErrorContext::new()
                    .with_field_path("appetite_level")
                    .with_source("pizza_estimator"),
            )),
        }
    }
}

/// Slice rates and pizza size.
#[derive(Debug, Clone, PartialEq)]
pub struct PizzaConfig {
    pub slices_per_pizza: u32,
    pub light_slices: u32,
    pub normal_slices: u32,
    pub heavy_slices: u32,
    /// Toppings the pizzas are spread over, in priority order.
    pub toppings: Vec<String>,
}

impl Default for PizzaConfig {
    fn default() -> Self {
        Self {
            slices_per_pizza: 8,
            light_slices: 2,
            normal_slices: 3,
            heavy_slices: 4,
            toppings: vec![
                "Margherita".to_string(),
                "Pepperoni".to_string(),
                "Vegetarian".to_string(),
            ],
        }
    }
}

impl PizzaConfig {
    pub fn slice_rate(&self, appetite: AppetiteLevel) -> u32 {
        match appetite {
            AppetiteLevel::Light => self.light_slices,
            AppetiteLevel::Normal => self.normal_slices,
            AppetiteLevel::Heavy => self.heavy_slices,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingShare {
    pub topping: String,
    pub pizzas: u64,
}

/// A recommendation for one order. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaOrderEstimate {
    pub people_count: u64,
    pub appetite_level: AppetiteLevel,
    pub pizza_count: u64,
    pub slices_per_person: f64,
    pub total_slices: u64,
    pub slices_per_pizza: u32,
    pub breakdown: Vec<ToppingShare>,
}

#[derive(Debug, Clone, Default)]
pub struct PizzaEstimator {
    config: PizzaConfig,
}

impl PizzaEstimator {
    pub fn new(config: PizzaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PizzaConfig {
        &self.config
    }

    /// Estimate from raw inputs, validating both.
    pub fn estimate(&self, people_count: i64, appetite_level: &str) -> Result<PizzaOrderEstimate> {
        let appetite = appetite_level.parse::<AppetiteLevel>()?;
        self.estimate_for(people_count, appetite)
    }

    pub fn estimate_for(&self, people_count: i64, appetite: AppetiteLevel) -> Result<PizzaOrderEstimate> {
        if people_count <= 0 {
            return Err(Error::invalid_argument_with_context(
                "people_count must be a positive integer",
                ErrorContext::new()
                    .with_field_path("people_count")
                    .with_details(people_count.to_string())
                    .with_source("pizza_estimator"),
            ));
        }
        if self.config.slices_per_pizza == 0 {
            return Err(Error::configuration_with_context(
                "slices_per_pizza must be positive",
                ErrorContext::new().with_source("pizza_estimator"),
            ));
        }

        let people = people_count as u64;
        let rate = self.config.slice_rate(appetite);
        let total_slices = people.checked_mul(u64::from(rate)).ok_or_else(|| {
            Error::invalid_argument_with_context(
                "people_count is too large to estimate",
                ErrorContext::new()
                    .with_field_path("people_count")
                    .with_details(format!("{people_count} people at {rate} slices each"))
                    .with_source("pizza_estimator"),
            )
        })?;
        let pizza_count = total_slices.div_ceil(u64::from(self.config.slices_per_pizza));

        Ok(PizzaOrderEstimate {
            people_count: people,
            appetite_level: appetite,
            pizza_count,
            slices_per_person: f64::from(rate),
            total_slices,
            slices_per_pizza: self.config.slices_per_pizza,
            breakdown: distribute(pizza_count, &self.config.toppings),
        })
    }
}

/// Estimate with the default slice rates.
pub fn estimate(people_count: i64, appetite_level: &str) -> Result<PizzaOrderEstimate> {
    PizzaEstimator::default().estimate(people_count, appetite_level)
}

// Round-robin: earlier toppings get the remainder, zero shares are dropped.
fn distribute(pizzas: u64, toppings: &[String]) -> Vec<ToppingShare> {
    if toppings.is_empty() {
        return Vec::new();
    }
    let n = toppings.len() as u64;
    let (base, extra) = (pizzas / n, pizzas % n);
    toppings
        .iter()
        .enumerate()
        .map(|(i, topping)| ToppingShare {
            topping: topping.clone(),
            pizzas: base + u64::from((i as u64) < extra),
        })
        .filter(|share| share.pizzas > 0)
        .collect()
}
