//! Data-pack recipe JSON.
//!
//! Crafting recipes read `KEY: item_id` ingredient lines; cooking recipes read
//! a single ingredient id plus cooking time and experience.

use super::{Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, require_text};
use crate::models::ModConfig;
use crate::services::validation::Validator;
use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeType {
    CraftingShaped,
    CraftingShapeless,
    Smelting,
    Smoking,
    Blasting,
}

impl RecipeType {
    pub const ALL: [RecipeType; 5] = [
        Self::CraftingShaped,
        Self::CraftingShapeless,
        Self::Smelting,
        Self::Smoking,
        Self::Blasting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CraftingShaped => "crafting_shaped",
            Self::CraftingShapeless => "crafting_shapeless",
            Self::Smelting => "smelting",
            Self::Smoking => "smoking",
            Self::Blasting => "blasting",
        }
    }
}

impl FromStr for RecipeType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GenerationError::unsupported("recipe type", Some(s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRef {
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CraftingResult {
    pub item: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookingRecipe {
    pub ingredient: ItemRef,
    pub result: String,
    pub experience: f64,
    #[serde(rename = "cookingtime")]
    pub cooking_time: u32,
}

/// A recipe as serialized into the data pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Recipe {
    #[serde(rename = "minecraft:crafting_shaped")]
    Shaped {
        pattern: Vec<String>,
        key: IndexMap<String, ItemRef>,
        result: CraftingResult,
    },
    #[serde(rename = "minecraft:crafting_shapeless")]
    Shapeless {
        ingredients: Vec<ItemRef>,
        result: CraftingResult,
    },
    #[serde(rename = "minecraft:smelting")]
    Smelting(CookingRecipe),
    #[serde(rename = "minecraft:smoking")]
    Smoking(CookingRecipe),
    #[serde(rename = "minecraft:blasting")]
    Blasting(CookingRecipe),
}

/// Parse `KEY: item_id` lines into an ordered key -> item mapping.
///
/// Only the first colon separates key from item, so namespaced ids survive.
/// Lines missing either side are skipped.
pub fn parse_ingredients(text: &str) -> IndexMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let (key, item) = line.split_once(':')?;
            let (key, item) = (key.trim(), item.trim());
            (!key.is_empty() && !item.is_empty()).then(|| (key.to_string(), item.to_string()))
        })
        .collect()
}

pub struct RecipeGenerator;

impl RecipeGenerator {
    /// Build the typed recipe for `config`.
    pub fn build_recipe(config: &ModConfig) -> Result<Recipe, GenerationError> {
        let recipe_type = match config.recipe_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.parse::<RecipeType>()?,
            _ => return Err(GenerationError::unsupported("recipe type", None)),
        };
        let output = require_text("outputItem", config.output_item.as_deref())?.to_string();

        match recipe_type {
            RecipeType::CraftingShaped => {
                let key: IndexMap<String, ItemRef> = crafting_ingredients(config)?
                    .into_iter()
                    .map(|(k, item)| (k, ItemRef { item }))
                    .collect();
                let pattern = require_text("pattern", config.pattern.as_deref())?
                    .lines()
                    .map(|line| line.trim().to_string())
                    .collect();
                Ok(Recipe::Shaped {
                    pattern,
                    key,
                    result: crafting_result(config, output),
                })
            }
            RecipeType::CraftingShapeless => {
                let ingredients = crafting_ingredients(config)?
                    .into_values()
                    .map(|item| ItemRef { item })
                    .collect();
                Ok(Recipe::Shapeless {
                    ingredients,
                    result: crafting_result(config, output),
                })
            }
            RecipeType::Smelting => Ok(Recipe::Smelting(cooking_recipe(config, output)?)),
            RecipeType::Smoking => Ok(Recipe::Smoking(cooking_recipe(config, output)?)),
            RecipeType::Blasting => Ok(Recipe::Blasting(cooking_recipe(config, output)?)),
        }
    }
}

fn crafting_ingredients(config: &ModConfig) -> Result<IndexMap<String, String>, GenerationError> {
    let text = require_text("ingredients", config.ingredients.as_deref())?;
    let parsed = parse_ingredients(text);
    if parsed.is_empty() {
        return Err(GenerationError::Validation {
            field: "ingredients".to_string(),
            value: text.to_string(),
            message: "expected one `KEY: item_id` entry per line".to_string(),
        });
    }
    Ok(parsed)
}

fn crafting_result(config: &ModConfig, item: String) -> CraftingResult {
    CraftingResult {
        item,
        count: config.output_count.unwrap_or(1),
    }
}

fn cooking_recipe(config: &ModConfig, result: String) -> Result<CookingRecipe, GenerationError> {
    let ingredient = require_text("ingredients", config.ingredients.as_deref())?.to_string();
    let cooking_time = config
        .cooking_time
        .ok_or_else(|| GenerationError::missing("cookingTime"))?;
    let experience = config
        .experience
        .ok_or_else(|| GenerationError::missing("experience"))?;

    Ok(CookingRecipe {
        ingredient: ItemRef { item: ingredient },
        result,
        experience,
        cooking_time,
    })
}

impl Generator for RecipeGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Recipe
    }

    fn generate(&self, config: &ModConfig, _validator: &Validator) -> Result<Generated, GenerationError> {
        let recipe = Self::build_recipe(config)?;
        let content = serde_json::to_string_pretty(&recipe).map_err(|e| GenerationError::Validation {
            field: "recipe".to_string(),
            value: String::new(),
            message: e.to_string(),
        })?;

        // `examplemod:ruby_block` -> `ruby_block.json`
        let output = config.output_item.as_deref().unwrap_or_default().trim();
        let stem = output.rsplit(':').next().unwrap_or(output).replace('/', "_");
        let filename = format!("{stem}.json");
        let path = format!("src/main/resources/data/{}/recipe/{filename}", config.mod_id);

        Ok(Generated::Single(GeneratedFile {
            filename,
            content,
            path: Some(path),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn recipe_config(recipe_type: &str) -> ModConfig {
        ModConfig {
            recipe_type: Some(recipe_type.to_string()),
            ..ModConfig::default()
        }
    }

    #[test]
    fn test_parse_ingredients_keeps_namespaces_and_order() {
        let parsed = parse_ingredients("A: minecraft:iron_ingot\nB: minecraft:stick");
        let entries: Vec<(&str, &str)> = parsed.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            entries,
            vec![("A", "minecraft:iron_ingot"), ("B", "minecraft:stick")]
        );
    }

    #[test]
    fn test_parse_ingredients_skips_malformed_lines() {
        let parsed = parse_ingredients("A: minecraft:iron_ingot\n\nnonsense\n : minecraft:stick\nC:");
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_shaped_recipe() {
        let recipe = RecipeGenerator::build_recipe(&recipe_config("crafting_shaped")).unwrap();
        match recipe {
            Recipe::Shaped { pattern, key, result } => {
                assert_eq!(pattern, vec!["AAA", "B", "B"]);
                assert_eq!(key["A"].item, "minecraft:iron_ingot");
                assert_eq!(result.count, 1);
            }
            other => panic!("unexpected recipe: {other:?}"),
        }
    }

    #[test]
    fn test_shapeless_recipe_json() {
        let generated = RecipeGenerator
            .generate(&recipe_config("crafting_shapeless"), &Validator::new())
            .unwrap();
        let json: Value = serde_json::from_str(&generated.files()[0].content).unwrap();

        assert_eq!(json["type"], "minecraft:crafting_shapeless");
        assert_eq!(json["ingredients"][1]["item"], "minecraft:stick");
        assert_eq!(json["result"]["item"], "examplemod:example_item");
    }

    #[test]
    fn test_blasting_recipe_json() {
        let config = ModConfig {
            ingredients: Some("mod:ore".to_string()),
            ..recipe_config("blasting")
        };
        let generated = RecipeGenerator.generate(&config, &Validator::new()).unwrap();
        let file = &generated.files()[0];
        let json: Value = serde_json::from_str(&file.content).unwrap();

        assert_eq!(json["type"], "minecraft:blasting");
        assert_eq!(json["cookingtime"], 200);
        assert_eq!(file.filename, "example_item.json");
        assert_eq!(
            file.path.as_deref(),
            Some("src/main/resources/data/example-mod/recipe/example_item.json")
        );
    }

    #[test]
    fn test_unknown_or_missing_recipe_type() {
        let err = RecipeGenerator::build_recipe(&recipe_config("brewing")).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedVariant { category: "recipe type", .. }));

        let config = ModConfig {
            recipe_type: None,
            ..ModConfig::default()
        };
        let err = RecipeGenerator::build_recipe(&config).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedVariant { .. }));
    }

    #[test]
    fn test_cooking_requires_fields() {
        let config = ModConfig {
            cooking_time: None,
            ..recipe_config("smoking")
        };
        let err = RecipeGenerator::build_recipe(&config).unwrap_err();
        assert_eq!(err, GenerationError::missing("cookingTime"));
    }
}
