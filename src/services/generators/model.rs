use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

const MODEL_TYPES: &[&str] = &["humanoid", "quadruped", "custom"];

/// Entity model skeleton, placed next to the renderers.
pub struct ModelGenerator;

impl Generator for ModelGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Model
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let model_type = config
            .model_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("humanoid");
        if !MODEL_TYPES.contains(&model_type) {
            return Err(GenerationError::unsupported("model type", Some(model_type)));
        }

        let pkg = package_for("model", &config.package_name);
        let parts = match model_type {
            "humanoid" => "head, body, left_arm, right_arm, left_leg, right_leg",
            "quadruped" => "head, body, leg0, leg1, leg2, leg3",
            _ => "root",
        };

        let imports = fabric_imports(GeneratorKind::Model).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}

// Model type: {model_type} ({parts})
public class {name}Model extends EntityModel<Entity> {{
    public {name}Model(ModelData data) {{
        super(data);
    }}

    @Override
    public void setAngles(Entity entity, float limbSwing, float limbSwingAmount,
                         float ageInTicks, float netHeadYaw, float headPitch) {{
        // Set animation angles
    }}
}}
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}Model.java"),
            content,
        )))
    }
}
