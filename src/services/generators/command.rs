use super::{
    Generated, GeneratedFile, GenerationError, Generator, GeneratorKind, fabric_imports,
    package_for, require_valid,
};
use crate::models::ModConfig;
use crate::services::validation::{FieldKind, Validator};

/// Brigadier command registered under the mod id.
///
/// Only the mod id is required; the Java class name is derived from it.
pub struct CommandGenerator;

impl Generator for CommandGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Command
    }

    fn generate(&self, config: &ModConfig, validator: &Validator) -> Result<Generated, GenerationError> {
        let command_id = config.mod_id.as_str();
        require_valid(validator, FieldKind::ModId, command_id)?;

        let pkg = package_for("command", &config.package_name);
        let name = command_class_name(command_id);

        let imports = fabric_imports(GeneratorKind::Command).join("\n");

        let content = format!(
            r#"package {pkg};

{imports}
import net.minecraft.item.ItemStack;
import net.minecraft.item.Items;

public class {name} {{
    public static void register() {{
        CommandRegistrationCallback.EVENT.register((dispatcher, registryAccess, environment) -> {{
            dispatcher.register(CommandManager.literal("{command_id}")
                .then(CommandManager.argument("amount", IntegerArgumentType.integer(1, 64))
                    .executes(context -> execute(context, IntegerArgumentType.getInteger(context, "amount"))))
                .executes({name}::executeNoArgs));
        }});
    }}

    private static int executeNoArgs(CommandContext<ServerCommandSource> context) {{
        return execute(context, 1);
    }}

    private static int execute(CommandContext<ServerCommandSource> context, int amount) {{
        ServerPlayerEntity player = context.getSource().getPlayer();
        if (player != null) {{
            ItemStack stack = new ItemStack(Items.DIAMOND, amount);
            boolean inserted = player.getInventory().insertStack(stack);
            context.getSource().sendFeedback(
                () -> Text.literal("§aGave " + amount + " diamonds! " + (inserted ? "§aInserted!" : "§eFull inventory!")),
                false
            );
        }}
        return 1;
    }}
}}

// Register in your main mod class onInitialize():
// {name}.register();
"#
        );

        Ok(Generated::Single(GeneratedFile::java(
            &pkg,
            format!("{name}.java"),
            content,
        )))
    }
}

/// `my-cool_mod` -> `MyCoolModCommand`.
fn command_class_name(mod_id: &str) -> String {
    let mut name: String = mod_id
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'M');
    }
    name.push_str("Command");
    name
}
