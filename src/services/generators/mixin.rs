use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid, strip_suffix,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

const DEFAULT_TARGET: &str = "PlayerEntity";

/// Mixin injecting into the class named by the class name minus `Mixin`.
pub struct MixinGenerator;

impl Generator for MixinGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Mixin
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let target = match strip_suffix(name, "Mixin") {
            "" => DEFAULT_TARGET,
            target => target,
        };
        let pkg = package_for("mixin", &config.package_name);
        let relative_pkg = pkg
            .strip_prefix(&format!("{}.", config.package_name))
            .unwrap_or(&pkg)
            .to_string();
        let mod_id = &config.mod_id;
        let tag = config.mod_id.to_uppercase();
        let mixin_entry = name.to_string();

        let imports = fabric_imports(GeneratorKind::Mixin).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}
import org.spongepowered.asm.mixin.Shadow;
import org.spongepowered.asm.mixin.injection.callback.CallbackInfoReturnable;
import net.minecraft.entity.damage.DamageSource;

@Mixin({target}.class)
public abstract class {name} {{
    private static final Logger LOGGER = LoggerFactory.getLogger("{tag}::{name}");

    @Shadow public abstract boolean isSneaking();
    @Shadow public abstract float getHealth();
    @Shadow public abstract void sendMessage(Text message, boolean actionBar);

    @Inject(method = "tick", at = @At("HEAD"))
    private void onTick(CallbackInfo ci) {{
        {target} self = ({target})(Object)this;
        if (self.getWorld().isClient()) return;

        // Custom tick behavior
        if (self.isSneaking() && self.getHealth() < 10.0f) {{
            self.sendMessage(Text.literal("§6[{tag}] §rLow health while sneaking!"), true);
        }}
    }}

    @Inject(method = "damage", at = @At("HEAD"), cancellable = true)
    private void modifyDamage(DamageSource source, float amount, CallbackInfoReturnable<Boolean> cir) {{
        {target} self = ({target})(Object)this;

        // Custom damage modification
        if (source.isOutOfWorld() && self.isSneaking()) {{
            cir.setReturnValue(false); // Void protection
            self.sendMessage(Text.literal("§c[{tag}] §rVoid protection activated!"), true);
            self.setHealth(5.0f);
        }}
    }}

    @Inject(method = "jump", at = @At("HEAD"))
    private void onJump(CallbackInfo ci) {{
        LOGGER.info("{target} jumped via mixin!");
    }}
}}

/* Required mixin config ({mod_id}.mixins.json):
{{
    "required": true,
    "minVersion": "0.8",
    "package": "{relative_pkg}",
    "compatibilityLevel": "JAVA_21",
    "refmap": "{mod_id}.refmap.json",
    "mixins": [
        "{mixin_entry}"
    ],
    "injectors": {{
        "defaultRequire": 1
    }}
}}
*/
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
    fn test_mixin_targets_stripped_name() {
        let config = ModConfig {
            class_name: "ZombieEntityMixin".to_string(),
            mod_id: "tweaks".to_string(),
            ..ModConfig::default()
        };
        let generated = MixinGenerator.generate(&config, &Validator::new()).unwrap();
        let file = &generated.files()[0];

        assert_eq!(file.filename, "ZombieEntityMixin.java");
        assert!(file.content.contains("@Mixin(ZombieEntity.class)"));
        assert!(file.content.contains(r#""package": "mixin""#));
        assert!(file.content.contains("TWEAKS::ZombieEntityMixin"));
    }

    #[test]
    fn test_mixin_without_suffix_targets_itself() {
        let config = ModConfig {
            class_name: "PlayerEntity".to_string(),
            ..ModConfig::default()
        };
        let generated = MixinGenerator.generate(&config, &Validator::new()).unwrap();
        assert!(generated.files()[0].content.contains("@Mixin(PlayerEntity.class)"));
    }
}
