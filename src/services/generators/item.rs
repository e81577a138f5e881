use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports, package_for,
    registry_type_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

pub struct ItemGenerator;

impl Generator for ItemGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Item
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let pkg = package_for("item", &config.package_name);
        let mod_id = &config.mod_id;
        let lower = name.to_lowercase();

        let imports = fabric_imports(GeneratorKind::Item).join("\n");
        let registry = registry_type_for("item");

        let content = format!(
            r#"package {pkg};

{imports}

public class {name}Item extends Item {{
    public static final {name}Item ITEM = Registry.register(
        Registries.{registry},
        Identifier.of("{mod_id}", "{lower}"),
        new {name}Item(new Item.Settings()
            .group(ItemGroup.MISC)
            .maxCount(64)
            .fireproof())
    );

    public {name}Item(Settings settings) {{
        super(settings);
    }}

    @Override
    public void appendTooltip(ItemStack stack, World world, List<Text> tooltip, TooltipContext context) {{
        tooltip.add(Text.literal("§6Custom {lower} item"));
        tooltip.add(Text.literal("§7Right-click for special effect"));
    }}

    @Override
    public ActionResult useOnBlock(ItemUsageContext context) {{
        // Custom block interaction
        return ActionResult.SUCCESS;
    }}
}}

// Register in your main mod class:
// {name}Item.ITEM
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}Item.java"),
            content,
        )))
    }
}
