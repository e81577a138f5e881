use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

/// HUD overlay drawing a health bar.
pub struct OverlayGenerator;

impl Generator for OverlayGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Overlay
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let name = config.class_name.as_str();
        require_valid(validator, FieldKind::ClassName, name)?;

        let pkg = package_for("overlay", &config.package_name);

        let imports = fabric_imports(GeneratorKind::Overlay).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}

@Environment(EnvType.CLIENT)
public class {name}Overlay implements HudRenderCallback {{
    private static final int X = 10;
    private static final int Y = 10;
    private static final int WIDTH = 81;
    private static final int HEIGHT = 9;
    private static boolean enabled = true;

    public static void register() {{
        HudRenderCallback.EVENT.register({name}Overlay::render);
    }}

    public static void toggle() {{
        enabled = !enabled;
    }}

    private static void render(DrawContext drawContext, float tickDelta) {{
        if (!enabled) return;

        MinecraftClient client = MinecraftClient.getInstance();
        if (client.player == null || client.options.debugEnabled) return;

        MatrixStack matrices = drawContext.getMatrices();

        // Health bar example
        float health = client.player.getHealth();
        float maxHealth = client.player.getMaxHealth();
        float healthPercent = MathHelper.clamp(health / maxHealth, 0.0f, 1.0f);

        // Background
        drawContext.fill(matrices, X, Y, X + WIDTH, Y + HEIGHT, 0x80000000);

        // Health bar
        int barWidth = (int)(WIDTH * healthPercent);
        int color = healthPercent > 0.6f ? 0xFF00FF00 :
                   healthPercent > 0.3f ? 0xFFFFFF00 : 0xFFFF0000;
        drawContext.fill(matrices, X + 1, Y + 1, X + 1 + barWidth, Y + HEIGHT - 1, color);

        // Text overlay
        String healthText = String.format("%.1f HP", health);
        drawContext.drawText(client.textRenderer, healthText, X + 2, Y + 1, 0xFFFFFFFF, true);
    }}
}}

// Register in your client initializer:
// {name}Overlay.register();
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}Overlay.java"),
            content,
        )))
    }
}
