use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports, package_for,
    registry_type_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

/// Living entity with basic AI goals and attributes.
pub struct EntityGenerator;

impl Generator for EntityGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Entity
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let pkg = package_for("entity", &config.package_name);
        let mod_id = &config.mod_id;
        let lower = name.to_lowercase();

        let imports = fabric_imports(GeneratorKind::Entity).join("\n");
        let registry = registry_type_for("entity");

        let content = format!(
            r#"package {pkg};

{imports}

public class {name}Entity extends LivingEntity {{
    public static final EntityType<{name}Entity> TYPE = Registry.register(
        Registries.{registry},
        Identifier.of("{mod_id}", "{lower}"),
        EntityType.Builder.<{name}Entity>create({name}Entity::new, SpawnGroup.CREATURE)
            .dimensions(0.6f, 1.8f)
            .build("{lower}")
    );

    public {name}Entity(EntityType<{name}Entity> type, World world) {{
        super(type, world);
    }}

    @Override
    protected void initGoals() {{
        this.goalSelector.add(1, new MeleeAttackGoal(this, 1.0, true));
        this.goalSelector.add(2, new WanderAroundFarGoal(this, 1.0));
        this.goalSelector.add(3, new LookAroundGoal(this));
    }}

    public static DefaultAttributeContainer.Builder getAttributes() {{
        return LivingEntity.createLivingAttributes()
            .add(EntityAttributes.GENERIC_MAX_HEALTH, 20.0)
            .add(EntityAttributes.GENERIC_MOVEMENT_SPEED, 0.25)
            .add(EntityAttributes.GENERIC_ATTACK_DAMAGE, 3.0);
    }}
}}

// Register in your main mod class:
// {name}Entity.TYPE
// EntityRendererRegistry.register({name}Entity.TYPE, {name}Renderer::new);
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}Entity.java"),
            content,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_generation() {
        let config = ModConfig {
            class_name: "Zombie".to_string(),
            mod_id: "mobs".to_string(),
            ..ModConfig::default()
        };
        let generated = EntityGenerator.generate(&config, &Validator::new()).unwrap();
        let file = &generated.files()[0];

        assert_eq!(file.filename, "ZombieEntity.java");
        assert_eq!(
            file.path.as_deref(),
            Some("src/main/java/com/example/entity/ZombieEntity.java")
        );
        assert!(file.content.starts_with("package com.example.entity;"));
        assert!(file.content.contains(r#"Identifier.of("mobs", "zombie")"#));
    }

    #[test]
    fn test_entity_rejects_bad_class_name() {
        let config = ModConfig {
            class_name: "zombie".to_string(),
            ..ModConfig::default()
        };
        let err = EntityGenerator.generate(&config, &Validator::new()).unwrap_err();
        assert!(err.is_validation());
    }
}
