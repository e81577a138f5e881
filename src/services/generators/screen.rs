use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid, strip_suffix,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

pub struct ScreenGenerator;

impl Generator for ScreenGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Screen
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let base_name = strip_suffix(&config.class_name, "Screen");
        require_valid(validator, FieldKind::ClassName, base_name)?;

        let name = format!("{base_name}Screen");
        let handler = format!("{base_name}ScreenHandler");
        let pkg = package_for("screen", &config.package_name);
        let mod_id = &config.mod_id;
        let texture = base_name.to_lowercase();

        let imports = fabric_imports(GeneratorKind::Screen).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}

@Environment(EnvType.CLIENT)
public class {name} extends HandledScreen<{handler}> {{
    private static final Identifier TEXTURE = Identifier.of(
        "{mod_id}",
        "textures/gui/{texture}.png"
    );

    public {name}({handler} handler, PlayerInventory inventory, Text title) {{
        super(handler, inventory, title);
        this.backgroundWidth = 176;
        this.backgroundHeight = 166;
        this.titleX = (this.backgroundWidth - this.textRenderer.getWidth(title)) / 2;
        this.titleY = 6;
        this.playerInventoryTitleX = 8;
        this.playerInventoryTitleY = this.backgroundHeight - 94;
    }}

    @Override
    protected void drawBackground(MatrixStack matrices, float delta, int mouseX, int mouseY) {{
        RenderSystem.setShaderTexture(0, TEXTURE);
        this.drawTexture(matrices, this.x, this.y, 0, 0, this.backgroundWidth, this.backgroundHeight);

        // Draw progress bars, energy, etc.
        this.drawProgressBar(matrices, delta);
    }}

    private void drawProgressBar(MatrixStack matrices, float delta) {{
        // Example progress bar (0-24 pixels)
        int progress = (int)(24 * (System.currentTimeMillis() % 2000) / 2000.0);
        this.drawTexture(matrices, this.x + 80, this.y + 34, 176, 0, progress, 16);
    }}

    @Override
    protected void drawForeground(MatrixStack matrices, int mouseX, int mouseY) {{
        this.textRenderer.draw(matrices, this.title, this.titleX, this.titleY, 0xFFFFFF);
        this.textRenderer.draw(matrices, Text.translatable("container.inventory").getString(),
                              this.playerInventoryTitleX, this.playerInventoryTitleY, 0xFFFFFF);
    }}

    @Override
    public boolean mouseClicked(double mouseX, double mouseY, int button) {{
        // Custom button handling
        return super.mouseClicked(mouseX, mouseY, button);
    }}
}}

// Register in client initializer:
// HandledScreens.register({handler}.TYPE, {name}::new);
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}.java"),
            content,
        )))
    }
}
