//! # Bead Recipes
//!
//! A recipe is a named palette plus fusion parameters: everything needed to
//! reproduce one bead. Recipes are stored as JSON:
//!
//! ```json
//! {
//!   "name": "Cosmic Drift",
//!   "colors": [
//!     { "id": "1", "hex": "#0f172a", "weight": 80 },
//!     { "id": "2", "hex": "#38bdf8", "weight": 40 }
//!   ],
//!   "params": {
//!     "turbulence": 45, "scale": 25, "distortion": 30,
//!     "roughness": 20, "seed": 1234, "style": "classic"
//!   }
//! }
//! ```
//!
//! Recipes can also come from an external generator that turns a free-text
//! prompt into a recipe. That generator is reached through the
//! [`RecipeGenerator`] trait; its replies use the envelope
//! `{"result": <recipe>}` or `{"error": "<message>"}`. A failed generation
//! never touches the current recipe held by [`RecipeState`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::CanvasConfig;
use crate::error::{FusionError, Result};
use crate::palette::{ColorStop, Palette, Rgb};
use crate::pattern::{FusionParams, MarbleStyle};
use crate::render::{RenderResult, render_canvas};

/// Message shown when a generated recipe cannot be used.
pub const FAILURE_NOTICE: &str = "Failed to generate recipe. Please try again or check API Key.";

/// A named palette and parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeadRecipe {
    pub name: String,
    pub colors: Palette,
    pub params: FusionParams,
}

impl BeadRecipe {
    /// The studio's starting recipe.
    pub fn cosmic_drift() -> Self {
        let stop = |id: &str, color: Rgb, weight: f64| ColorStop {
            id: id.to_string(),
            color,
            weight,
        };
        Self {
            name: "Cosmic Drift".to_string(),
            colors: Palette::from_stops_unchecked(vec![
                stop("1", Rgb::new(0x0f, 0x17, 0x2a), 80.0),
                stop("2", Rgb::new(0x38, 0xbd, 0xf8), 40.0),
                stop("3", Rgb::new(0xe8, 0x79, 0xf9), 30.0),
            ]),
            params: FusionParams {
                turbulence: 45.0,
                scale: 25.0,
                distortion: 30.0,
                seed: 1234.0,
                roughness: 20.0,
                style: MarbleStyle::Classic,
            },
        }
    }

    /// Check the palette can be rendered.
    pub fn validate(&self) -> Result<()> {
        self.colors.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: Self = serde_json::from_str(json)?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Render this recipe onto `canvas`.
    pub fn render(&self, canvas: &CanvasConfig) -> Result<RenderResult> {
        render_canvas(&self.colors, &self.params, canvas, None)
    }
}

impl Default for BeadRecipe {
    fn default() -> Self {
        Self::cosmic_drift()
    }
}

impl fmt::Display for BeadRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, stop) in self.colors.stops().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", stop.color, stop.weight)?;
        }
        write!(f, "] {}", self.params)
    }
}

/// Request body sent to a recipe generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRequest {
    pub prompt: String,
}

impl RecipeRequest {
    /// Blank prompts are rejected before anything is sent.
    pub fn new(prompt: &str) -> Result<Self> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(FusionError::invalid_parameter("prompt cannot be empty"));
        }
        Ok(Self {
            prompt: prompt.to_string(),
        })
    }
}

/// Reply envelope of a recipe generator.
#[derive(Debug, Deserialize)]
struct GeneratorResponse {
    result: Option<BeadRecipe>,
    error: Option<String>,
}

/// Decode a generator reply into a usable recipe.
///
/// Error replies, malformed JSON and unrenderable palettes all become
/// [`FusionError::RecipeGeneration`]. Parameters are clamped into range.
pub fn parse_generator_response(body: &str) -> Result<BeadRecipe> {
    let response: GeneratorResponse = serde_json::from_str(body)
        .map_err(|e| FusionError::recipe_generation(format!("malformed response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(FusionError::recipe_generation(error));
    }
    let mut recipe = response
        .result
        .ok_or_else(|| FusionError::recipe_generation("response carried no recipe"))?;

    recipe
        .validate()
        .map_err(|e| FusionError::recipe_generation(e.to_string()))?;
    recipe.params = recipe.params.clamped();
    Ok(recipe)
}

/// Something that turns a prompt into a recipe (usually a remote model).
pub trait RecipeGenerator {
    fn generate(&self, request: &RecipeRequest) -> Result<BeadRecipe>;
}

/// User-facing report of a failed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    /// Text to show the user
    pub message: String,
    /// Underlying cause, for logs
    pub cause: String,
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The last good recipe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeState {
    current: BeadRecipe,
}

impl RecipeState {
    pub fn new(recipe: BeadRecipe) -> Self {
        Self { current: recipe }
    }

    pub fn current(&self) -> &BeadRecipe {
        &self.current
    }

    /// Adopt a generation outcome.
    ///
    /// On success the new recipe replaces the current one. On failure the
    /// current recipe is kept and a [`FailureNotice`] is returned.
    pub fn apply(
        &mut self,
        outcome: Result<BeadRecipe>,
    ) -> std::result::Result<&BeadRecipe, FailureNotice> {
        match outcome.and_then(|recipe| recipe.validate().map(|()| recipe)) {
            Ok(recipe) => {
                tracing::info!(name = %recipe.name, "applied recipe");
                self.current = recipe;
                Ok(&self.current)
            }
            Err(e) => {
                tracing::warn!(error = %e, kept = %self.current.name, "recipe rejected");
                Err(FailureNotice {
                    message: FAILURE_NOTICE.to_string(),
                    cause: e.to_string(),
                })
            }
        }
    }

    /// Ask `generator` for a recipe and apply the result.
    pub fn generate_with(
        &mut self,
        generator: &dyn RecipeGenerator,
        prompt: &str,
    ) -> std::result::Result<&BeadRecipe, FailureNotice> {
        let outcome = RecipeRequest::new(prompt).and_then(|request| generator.generate(&request));
        self.apply(outcome)
    }
}
