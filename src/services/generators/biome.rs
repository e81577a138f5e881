use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

/// Biome definition plus its worldgen JSON; the only multi-file generator.
pub struct BiomeGenerator;

impl Generator for BiomeGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Biome
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let pkg = package_for("biome", &config.package_name);
        let lower = name.to_lowercase();

        let imports = fabric_imports(GeneratorKind::Biome).join("\n");

        let source = format!(
            r#"package {pkg};

{imports}

public class {name}Biome {{
    public static final Biome BIOME = createBiome();

    private static Biome createBiome() {{
        return new Biome.Builder()
            .precipitation(true)
            .temperature(0.8F)
            .downfall(0.4F)
            .effects(new BiomeEffects.Builder()
                .fogColor(12638463)
                .waterColor(4159204)
                .waterFogColor(329011)
                .skyColor(7972607)
                .moodSound(BiomeMoodSound.CAVE)
                .build())
            .build();
    }}
}}
"#
        );

        let data = serde_json::json!({
            "has_precipitation": true,
            "temperature": 0.8,
            "downfall": 0.4,
            "effects": {
                "fog_color": 12638463,
                "water_color": 4159204,
                "water_fog_color": 329011,
                "sky_color": 7972607,
            },
            "spawners": {},
            "spawn_costs": {},
            "carvers": {},
            "features": [],
        });
        let data_file = GeneratedFile {
            filename: format!("{lower}.json"),
            content: format!("{data:#}\n"),
            path: Some(format!(
                "src/main/resources/data/{}/worldgen/biome/{lower}.json",
                config.mod_id
            )),
        };

        Ok(Generated::Multiple(vec![
            GeneratedFile::java(&pkg, format!("{name}Biome.java"), source),
            data_file,
        ]))
    }
}
