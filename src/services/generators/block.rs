use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, registry_type_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

const DEFAULT_HARDNESS: f64 = 5.0;
const DEFAULT_SOUND: &str = "STONE";

/// Block plus its block item, with configurable hardness and sound group.
pub struct BlockGenerator;

impl Generator for BlockGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Block
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let pkg = package_for("block", &config.package_name);
        let mod_id = &config.mod_id;
        let lower = name.to_lowercase();
        let hardness = format_float(config.hardness.unwrap_or(DEFAULT_HARDNESS));
        let sound = config
            .sound
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOUND)
            .to_uppercase();

        let imports = fabric_imports(GeneratorKind::Block).join("\n");
        let registry = registry_type_for("block");

        let content = format!(
            r#"package {pkg};

{imports}
import net.minecraft.block.AbstractBlock;
import net.minecraft.block.Blocks;
import net.minecraft.block.FabricBlockSettings;

public class {name}Block extends Block {{
    public static final {name}Block BLOCK = Registry.register(
        Registries.{registry},
        new Identifier("{mod_id}", "{lower}"),
        new {name}Block(FabricBlockSettings.of(Blocks.STONE)
            .strength({hardness}f, 6.0f)
            .sounds(BlockSoundGroup.{sound}))
    );

    public static final Item ITEM = Registry.register(
        Registries.ITEM,
        new Identifier("{mod_id}", "{lower}"),
        new BlockItem(BLOCK, new Item.Settings().group(ItemGroup.BUILDING_BLOCKS))
    );

    public {name}Block(Settings settings) {{
        super(settings);
    }}

    @Override
    public boolean hasRandomTicks(BlockState state) {{
        return true; // Enable random ticks for growth/decay
    }}
}}

// Register in your main mod class:
// {name}Block.BLOCK
// {name}Block.ITEM
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}Block.java"),
            content,
        )))
    }
}

/// Java float literal text: `5` renders as `5.0`.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
