//! Artifact generators.
//!
//! Every supported artifact kind is a [`GeneratorKind`] variant backed by one
//! [`Generator`] implementation. Generators are pure: they validate the fields
//! they need, interpolate them into a fixed template and return the result.
//! The [`GeneratorRegistry`](crate::services::GeneratorRegistry) owns the
//! enum-keyed table and the cache in front of it.

mod biome;
mod block;
mod command;
mod entity;
mod event;
mod item;
mod mixin;
mod mod_config;
mod model;
mod overlay;
mod recipe;
mod renderer;
mod screen;

pub use biome::BiomeGenerator;
pub use block::BlockGenerator;
pub use command::CommandGenerator;
pub use entity::EntityGenerator;
pub use event::{EventGenerator, EventType};
pub use item::ItemGenerator;
pub use mixin::MixinGenerator;
pub use mod_config::ConfigGenerator;
pub use model::ModelGenerator;
pub use overlay::OverlayGenerator;
pub use recipe::{CookingRecipe, CraftingResult, ItemRef, Recipe, RecipeGenerator, RecipeType, parse_ingredients};
pub use renderer::RendererGenerator;
pub use screen::ScreenGenerator;

use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl GeneratedFile {
    /// A Java source file placed under `src/main/java/<package dirs>/`.
    pub fn java(package: &str, filename: String, content: String) -> Self {
        let path = format!("src/main/java/{}/{}", package.replace('.', "/"), filename);
        Self {
            filename,
            content,
            path: Some(path),
        }
    }

    /// Relative path to write this file to, falling back to the bare filename.
    pub fn target_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.filename)
    }
}

/// Result of a generator call: either one file or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Generated {
    Single(GeneratedFile),
    Multiple(Vec<GeneratedFile>),
}

impl Generated {
    pub fn files(&self) -> &[GeneratedFile] {
        match self {
            Self::Single(file) => std::slice::from_ref(file),
            Self::Multiple(files) => files,
        }
    }

    pub fn into_files(self) -> Vec<GeneratedFile> {
        match self {
            Self::Single(file) => vec![file],
            Self::Multiple(files) => files,
        }
    }
}

/// Errors a single generation request can fail with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A field failed its rule. User-correctable.
    #[error("Invalid {field} \"{value}\": {message}")]
    Validation {
        field: String,
        value: String,
        message: String,
    },

    /// Unknown generator type, recipe type, event type or model type.
    #[error("Unsupported {category}: {value}")]
    UnsupportedVariant { category: &'static str, value: String },
}

impl GenerationError {
    pub fn unsupported(category: &'static str, value: Option<&str>) -> Self {
        Self::UnsupportedVariant {
            category,
            value: value.unwrap_or("(none)").to_string(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            value: String::new(),
            message: "value is required".to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// The fixed set of artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Entity,
    Block,
    Item,
    Command,
    Renderer,
    Screen,
    Overlay,
    Config,
    Mixin,
    Recipe,
    Event,
    Biome,
    Model,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 13] = [
        Self::Entity,
        Self::Block,
        Self::Item,
        Self::Command,
        Self::Renderer,
        Self::Screen,
        Self::Overlay,
        Self::Config,
        Self::Mixin,
        Self::Recipe,
        Self::Event,
        Self::Biome,
        Self::Model,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Block => "block",
            Self::Item => "item",
            Self::Command => "command",
            Self::Renderer => "renderer",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Config => "config",
            Self::Mixin => "mixin",
            Self::Recipe => "recipe",
            Self::Event => "event",
            Self::Biome => "biome",
            Self::Model => "model",
        }
    }

    /// Short description shown next to the kind in listings.
    pub fn description(self) -> &'static str {
        match self {
            Self::Entity => "Custom mobs/entities",
            Self::Block => "Custom blocks",
            Self::Item => "Custom items",
            Self::Command => "Custom commands",
            Self::Renderer => "Entity/block rendering",
            Self::Screen => "Custom GUIs/screens",
            Self::Overlay => "HUD overlays",
            Self::Config => "Mod configuration",
            Self::Mixin => "Advanced mixins",
            Self::Recipe => "Crafting/smelting recipes",
            Self::Event => "Event listeners",
            Self::Biome => "World biomes",
            Self::Model => "Entity models",
        }
    }

}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GenerationError::unsupported("generator type", Some(s)))
    }
}

/// Shared capability of every artifact generator.
pub trait Generator: Send + Sync {
    fn kind(&self) -> GeneratorKind;

    fn generate(
        &self,
        config: &ModConfig,
        validator: &Validator,
    ) -> Result<Generated, GenerationError>;
}

/// Dotted sub-package for an artifact type under the base package.
///
/// Unknown types fall back to the base package.
pub fn package_for(kind: &str, base: &str) -> String {
    let suffix = match kind {
        "entity" => "entity",
        "block" => "block",
        "item" => "item",
        "command" => "command",
        "renderer" | "model" => "client.render",
        "screen" => "client.screen",
        "overlay" => "client.overlay",
        "config" => "config",
        "mixin" => "mixin",
        "event" => "event",
        "biome" => "world.biome",
        _ => return base.to_string(),
    };
    format!("{base}.{suffix}")
}

/// Registry category token for an artifact type.
///
/// Unknown types fall back to the upper-cased type name.
pub fn registry_type_for(kind: &str) -> String {
    match kind {
        "entity" => "ENTITY_TYPE".to_string(),
        "block" => "BLOCK".to_string(),
        "item" => "ITEM".to_string(),
        other => other.to_uppercase(),
    }
}

const COMMON_IMPORTS: &[&str] = &[
    "import net.minecraft.util.Identifier;",
    "import net.minecraft.registry.Registries;",
    "import net.minecraft.registry.Registry;",
    "import net.fabricmc.api.ModInitializer;",
];

/// Common Fabric imports followed by the fixed per-type list.
pub fn fabric_imports(kind: GeneratorKind) -> Vec<&'static str> {
    let specific: &[&str] = match kind {
        GeneratorKind::Entity => &[
            "import net.minecraft.entity.EntityType;",
            "import net.minecraft.entity.LivingEntity;",
            "import net.minecraft.entity.SpawnGroup;",
            "import net.minecraft.entity.ai.goal.MeleeAttackGoal;",
            "import net.minecraft.entity.ai.goal.WanderAroundFarGoal;",
            "import net.minecraft.entity.ai.goal.LookAroundGoal;",
            "import net.minecraft.entity.attribute.DefaultAttributeContainer;",
            "import net.minecraft.entity.attribute.EntityAttributes;",
            "import net.minecraft.entity.damage.DamageSource;",
            "import net.minecraft.entity.player.PlayerEntity;",
            "import net.minecraft.world.World;",
        ],
        GeneratorKind::Block => &[
            "import net.minecraft.block.Block;",
            "import net.minecraft.block.BlockState;",
            "import net.minecraft.item.BlockItem;",
            "import net.minecraft.item.Item;",
            "import net.minecraft.item.ItemGroup;",
            "import net.minecraft.sound.BlockSoundGroup;",
        ],
        GeneratorKind::Item => &[
            "import net.minecraft.item.Item;",
            "import net.minecraft.item.ItemGroup;",
            "import net.minecraft.item.ItemStack;",
            "import net.minecraft.client.item.TooltipContext;",
            "import net.minecraft.text.Text;",
            "import net.minecraft.world.World;",
        ],
        GeneratorKind::Command => &[
            "import com.mojang.brigadier.CommandDispatcher;",
            "import com.mojang.brigadier.arguments.IntegerArgumentType;",
            "import com.mojang.brigadier.context.CommandContext;",
            "import net.fabricmc.fabric.api.command.v2.CommandRegistrationCallback;",
            "import net.minecraft.server.command.CommandManager;",
            "import net.minecraft.server.command.ServerCommandSource;",
            "import net.minecraft.server.network.ServerPlayerEntity;",
            "import net.minecraft.text.Text;",
        ],
        GeneratorKind::Model => &[
            "import net.minecraft.client.model.ModelData;",
            "import net.minecraft.client.render.entity.model.EntityModel;",
            "import net.minecraft.entity.Entity;",
        ],
        GeneratorKind::Renderer => &[
            "import net.fabricmc.api.EnvType;",
            "import net.fabricmc.api.Environment;",
            "import net.minecraft.client.render.VertexConsumerProvider;",
            "import net.minecraft.client.render.entity.EntityRendererFactory;",
            "import net.minecraft.client.render.entity.LivingEntityRenderer;",
            "import net.minecraft.client.util.math.MatrixStack;",
        ],
        GeneratorKind::Screen => &[
            "import net.minecraft.client.gui.screen.ingame.HandledScreens;",
            "import net.minecraft.client.gui.screen.ingame.HandledScreen;",
            "import net.minecraft.entity.player.PlayerInventory;",
            "import net.minecraft.text.Text;",
            "import net.minecraft.screen.ScreenHandler;",
            "import net.minecraft.screen.slot.Slot;",
            "import net.fabricmc.api.EnvType;",
            "import net.fabricmc.api.Environment;",
        ],
        GeneratorKind::Overlay => &[
            "import net.fabricmc.fabric.api.client.rendering.v1.HudRenderCallback;",
            "import net.minecraft.client.MinecraftClient;",
            "import net.minecraft.client.gui.DrawContext;",
            "import net.minecraft.client.util.math.MatrixStack;",
            "import net.minecraft.text.Text;",
            "import net.minecraft.util.math.MathHelper;",
            "import net.fabricmc.api.EnvType;",
            "import net.fabricmc.api.Environment;",
        ],
        GeneratorKind::Config => &[
            "import me.shedaniel.autoconfig.ConfigData;",
            "import me.shedaniel.autoconfig.annotation.ConfigEntry.Gui.RequiresRestart;",
            "import me.shedaniel.autoconfig.annotation.ConfigName;",
            "import me.shedaniel.autoconfig.annotation.ConfigEntry.Gui.TransitiveObject;",
            "import me.shedaniel.cloth.clothconfig.shadowed.blue.endless.jankson.Comment;",
        ],
        GeneratorKind::Mixin => &[
            "import org.slf4j.Logger;",
            "import org.slf4j.LoggerFactory;",
            "import org.spongepowered.asm.mixin.Mixin;",
            "import org.spongepowered.asm.mixin.injection.At;",
            "import org.spongepowered.asm.mixin.injection.Inject;",
            "import org.spongepowered.asm.mixin.injection.callback.CallbackInfo;",
            "import net.minecraft.entity.player.PlayerEntity;",
            "import net.minecraft.text.Text;",
        ],
        GeneratorKind::Biome => &[
            "import net.minecraft.world.biome.Biome;",
            "import net.minecraft.world.biome.BiomeEffects;",
            "import net.minecraft.sound.BiomeMoodSound;",
        ],
        GeneratorKind::Recipe | GeneratorKind::Event => &[],
    };

    COMMON_IMPORTS.iter().chain(specific).copied().collect()
}

/// Fail with a validation error unless `value` passes the rule for `kind`.
pub(crate) fn require_valid(
    validator: &Validator,
    kind: FieldKind,
    value: &str,
) -> Result<(), GenerationError> {
    let result = validator.validate(kind, value);
    if result.valid {
        return Ok(());
    }

    let mut message = result.error.unwrap_or_default();
    if let Some(pattern) = kind.pattern() {
        message.push_str(&format!(" (expected pattern {pattern})"));
    }
    Err(GenerationError::Validation {
        field: kind.field_name().to_string(),
        value: value.to_string(),
        message,
    })
}

/// A required free-text field: present and non-blank after trimming.
pub(crate) fn require_text<'a>(
    field: &str,
    value: Option<&'a str>,
) -> Result<&'a str, GenerationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GenerationError::missing(field)),
    }
}

/// Drop a trailing `suffix` from a class name (`FooRenderer` -> `Foo`).
pub(crate) fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    name.strip_suffix(suffix).unwrap_or(name)
}
