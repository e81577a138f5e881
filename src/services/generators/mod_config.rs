use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid, strip_suffix,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

/// AutoConfig data class for the mod's runtime settings.
pub struct ConfigGenerator;

impl Generator for ConfigGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Config
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let config_name = strip_suffix(&config.class_name, "Config");
        require_valid(validator, FieldKind::ClassName, config_name)?;

        let name = format!("{config_name}Config");
        let pkg = package_for("config", &config.package_name);
        let lower = config_name.to_lowercase();

        let imports = fabric_imports(GeneratorKind::Config).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}

@ConfigName("{config_name}")
public class {name} implements ConfigData {{

    @Comment("General mod settings")
    @TransitiveObject
    public General general = new General();

    @Comment("{config_name} specific settings")
    @TransitiveObject
    public {config_name}Settings settings = new {config_name}Settings();

    public static class General {{
        @Comment("Enable custom features")
        public boolean enableCustomFeatures = true;

        @RequiresRestart
        @Comment("Debug logging")
        public boolean debugMode = false;

        @Comment("Performance optimizations")
        public boolean performanceMode = true;
    }}

    public static class {config_name}Settings {{
        @Comment("{config_name} spawn weight (0 = disabled)")
        public int spawnWeight = 10;

        @Comment("Minimum spawn group size")
        public int minGroupSize = 1;

        @Comment("Maximum spawn group size")
        public int maxGroupSize = 4;

        @Comment("Custom {lower} health")
        public float customHealth = 20.0f;

        @Comment("Enable {lower} sounds")
        public boolean enableSounds = true;
    }}
}}

// Registration (add to main mod class):
// AutoConfig.register({name}.class, JanksonConfigSerializer::new);
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}.java"),
            content,
        )))
    }
}
