use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid, strip_suffix,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

/// Client-side renderer for the entity named by the class name minus `Renderer`.
pub struct RendererGenerator;

impl Generator for RendererGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Renderer
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let entity_name = strip_suffix(&config.class_name, "Renderer");
        require_valid(validator, FieldKind::ClassName, entity_name)?;

        let name = format!("{entity_name}Renderer");
        let pkg = package_for("renderer", &config.package_name);
        let base_pkg = &config.package_name;
        let mod_id = &config.mod_id;
        let lower = entity_name.to_lowercase();
        let upper = entity_name.to_uppercase();

        let imports = fabric_imports(GeneratorKind::Renderer).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}
import {base_pkg}.entity.{entity_name}Entity;
import {base_pkg}.client.render.{entity_name}Model;

@Environment(EnvType.CLIENT)
public class {name} extends LivingEntityRenderer<{entity_name}Entity, {entity_name}Model> {{
    private static final Identifier TEXTURE = Identifier.of(
        "{mod_id}",
        "textures/entity/{lower}.png"
    );

    public {name}(EntityRendererFactory.Context context) {{
        super(context, new {entity_name}Model(context.getPart(EntityModelLayers.{upper}_MAIN)), 0.5F);
    }}

    @Override
    public Identifier getTexture({entity_name}Entity entity) {{
        return TEXTURE;
    }}

    @Override
    public void render({entity_name}Entity entity, float yaw, float tickDelta, MatrixStack matrices,
                      VertexConsumerProvider vertexConsumers, int light) {{
        super.render(entity, yaw, tickDelta, matrices, vertexConsumers, light);

        // Custom rendering effects
        if (entity.isGlowing()) {{
            // Add glowing effect
        }}
    }}
}}

// Register in your client initializer:
// EntityRendererRegistry.register({entity_name}Entity.TYPE, {name}::new);
"#
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

    #[test]
    fn test_renderer_strips_suffix() {
        let config = ModConfig {
            class_name: "GoblinRenderer".to_string(),
            ..ModConfig::default()
        };
        let generated = RendererGenerator.generate(&config, &Validator::new()).unwrap();
        let file = &generated.files()[0];

        assert_eq!(file.filename, "GoblinRenderer.java");
        assert_eq!(
            file.path.as_deref(),
            Some("src/main/java/com/example/client/render/GoblinRenderer.java")
        );
        assert!(file.content.contains("import com.example.entity.GoblinEntity;"));
        assert!(file.content.contains("EntityModelLayers.GOBLIN_MAIN"));
    }

    #[test]
    fn test_renderer_validates_entity_name() {
        let config = ModConfig {
            class_name: "GoRenderer".to_string(),
            ..ModConfig::default()
        };
        assert!(RendererGenerator.generate(&config, &Validator::new()).is_err());
    }
}
