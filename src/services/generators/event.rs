use super::{Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, package_for, require_valid};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    ServerTick,
    ClientTick,
    PlayerJoin,
    BlockBreak,
    EntityDamage,
    ItemUse,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        Self::ServerTick,
        Self::ClientTick,
        Self::PlayerJoin,
        Self::BlockBreak,
        Self::EntityDamage,
        Self::ItemUse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServerTick => "server_tick",
            Self::ClientTick => "client_tick",
            Self::PlayerJoin => "player_join",
            Self::BlockBreak => "block_break",
            Self::EntityDamage => "entity_damage",
            Self::ItemUse => "item_use",
        }
    }

    fn import(self) -> &'static str {
        match self {
            Self::ServerTick => "import net.fabricmc.fabric.api.event.lifecycle.v1.ServerTickEvents;",
            Self::ClientTick => "import net.fabricmc.fabric.api.client.event.lifecycle.v1.ClientTickEvents;",
            Self::PlayerJoin => "import net.fabricmc.fabric.api.networking.v1.ServerPlayConnectionEvents;",
            Self::BlockBreak => "import net.fabricmc.fabric.api.event.player.PlayerBlockBreakEvents;",
            Self::EntityDamage => "import net.fabricmc.fabric.api.entity.event.v1.ServerLivingEntityEvents;",
            Self::ItemUse => "import net.fabricmc.fabric.api.event.player.UseItemCallback;",
        }
    }

    /// Registration call; `{name}` is replaced with the listener class.
    fn registration(self) -> &'static str {
        match self {
            Self::ServerTick => {
                "ServerTickEvents.END_SERVER_TICK.register(server -> new {name}().onTick(server));"
            }
            Self::ClientTick => {
                "ClientTickEvents.END_CLIENT_TICK.register(client -> new {name}().onTick(client));"
            }
            Self::PlayerJoin => {
                "ServerPlayConnectionEvents.JOIN.register((handler, sender, server) -> new {name}().onPlayerJoin());"
            }
            Self::BlockBreak => {
                "PlayerBlockBreakEvents.AFTER.register((world, player, pos, state, blockEntity) -> new {name}().onBlockBreak());"
            }
            Self::EntityDamage => {
                "ServerLivingEntityEvents.ALLOW_DAMAGE.register((entity, source, amount) -> new {name}().onDamage());"
            }
            Self::ItemUse => {
                "UseItemCallback.EVENT.register((player, world, hand) -> new {name}().onItemUse());"
            }
        }
    }

    fn callback(self) -> &'static str {
        match self {
            Self::ServerTick => "    public void onTick(Object server) {\n        // Your code here\n    }",
            Self::ClientTick => "    public void onTick(Object client) {\n        // Your code here\n    }",
            Self::PlayerJoin => "    public void onPlayerJoin() {\n        // Your code here\n    }",
            Self::BlockBreak => "    public void onBlockBreak() {\n        // Your code here\n    }",
            Self::EntityDamage => "    public boolean onDamage() {\n        // Your code here\n        return true;\n    }",
            Self::ItemUse => "    public void onItemUse() {\n        // Your code here\n    }",
        }
    }
}

impl FromStr for EventType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GenerationError::unsupported("event type", Some(s)))
    }
}

/// Event listener class plus the call that registers it.
pub struct EventGenerator;

impl Generator for EventGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Event
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let event = match config.event_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.parse::<EventType>()?,
            _ => return Err(GenerationError::unsupported("event type", None)),
        };
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let pkg = package_for("event", &config.package_name);
        let content = format!(
            "package {pkg};\n\n{import}\n\npublic class {name} {{\n{callback}\n}}\n\n// Registration\n// {registration}\n",
            import = event.import(),
            callback = event.callback(),
            registration = event.registration().replace("{name}", name),
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}.java"),
            content,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_config(event_type: &str) -> ModConfig {
        ModConfig {
            class_name: "JoinListener".to_string(),
            event_type: Some(event_type.to_string()),
            ..ModConfig::default()
        }
    }

    #[test]
    fn test_event_listener_sections() {
        let generated = EventGenerator
            .generate(&event_config("player_join"), &Validator::new())
            .unwrap();
        let file = &generated.files()[0];

        assert_eq!(file.filename, "JoinListener.java");
        assert!(file.content.contains(EventType::PlayerJoin.import()));
        assert!(file.content.contains("public void onPlayerJoin()"));
        assert!(file.content.contains("new JoinListener().onPlayerJoin()"));
    }

    #[test]
    fn test_every_event_type_generates() {
        for event in EventType::ALL {
            let result = EventGenerator.generate(&event_config(event.as_str()), &Validator::new());
            assert!(result.is_ok(), "{}", event.as_str());
        }
    }

    #[test]
    fn test_unknown_event_type() {
        let err = EventGenerator
            .generate(&event_config("rain_start"), &Validator::new())
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::UnsupportedVariant {
                category: "event type",
                value: "rain_start".to_string()
            }
        );
    }

    #[test]
    fn test_missing_event_type() {
        let config = ModConfig {
            event_type: None,
            ..event_config("server_tick")
        };
        let err = EventGenerator.generate(&config, &Validator::new()).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedVariant { .. }));
    }
}
