//! Full Fabric project skeleton export.
//!
//! Produces an ordered map from relative path to file content. Every logical
//! path can be redirected through [`ExportOptions::folder_map`].

use crate::models::ModConfig;
use crate::services::sinks::{FileDownloadSink, SinkError};
use indexmap::IndexMap;
use serde::Serialize;

pub const FABRIC_LOADER_VERSION: &str = "0.16.7";

/// Extra knobs for [`ProjectExporter::export`].
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Logical path (`build.gradle`, `Mod.java`, ...) to physical path.
    pub folder_map: IndexMap<String, String>,
    /// Additional files appended after the skeleton, also remapped.
    pub extra_files: IndexMap<String, String>,
    pub include_docs: bool,
}

/// Dependency versions selected by the Minecraft version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyVersions {
    pub loom: &'static str,
    pub fabric_api: &'static str,
}

impl DependencyVersions {
    pub fn for_minecraft(version: &str) -> Self {
        if version == "1.21.10" {
            Self {
                loom: "1.7-SNAPSHOT",
                fabric_api: "0.108.0+1.21.10",
            }
        } else {
            Self {
                loom: "1.6-SNAPSHOT",
                fabric_api: "0.100.7+1.21",
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FabricModJson<'a> {
    schema_version: u32,
    id: &'a str,
    version: &'static str,
    name: &'a str,
    description: &'a str,
    authors: Vec<String>,
    contact: Contact,
    license: &'static str,
    icon: String,
    environment: &'static str,
    entrypoints: Entrypoints,
    mixins: Vec<String>,
    depends: Depends<'a>,
}

#[derive(Debug, Serialize)]
struct Contact {
    homepage: String,
    sources: String,
}

#[derive(Debug, Serialize)]
struct Entrypoints {
    main: Vec<String>,
    client: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Depends<'a> {
    fabricloader: String,
    minecraft: &'a str,
    java: &'static str,
    #[serde(rename = "fabric-api")]
    fabric_api: &'static str,
}

#[derive(Debug, Default)]
pub struct ProjectExporter;

impl ProjectExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, config: &ModConfig, options: &ExportOptions) -> IndexMap<String, String> {
        let mut files = IndexMap::new();
        let mut put = |logical: &str, default_path: String, content: String| {
            let path = options
                .folder_map
                .get(logical)
                .cloned()
                .unwrap_or(default_path);
            files.insert(path, content);
        };

        let pkg_dir = config.package_name.replace('.', "/");

        put("build.gradle", "build.gradle".into(), build_gradle(config));
        put(
            "gradle.properties",
            "gradle.properties".into(),
            gradle_properties(config),
        );
        put(
            "fabric.mod.json",
            "src/main/resources/fabric.mod.json".into(),
            fabric_mod_json(config),
        );
        put(".gitignore", ".gitignore".into(), GITIGNORE.to_string());
        put("README.md", "README.md".into(), readme(config));
        put(
            "Mod.java",
            format!("src/main/java/{pkg_dir}/Mod.java"),
            mod_initializer(config),
        );
        put(
            "ModClient.java",
            format!("src/client/java/{pkg_dir}/client/ModClient.java"),
            client_initializer(config),
        );
        if options.include_docs {
            put(
                "docs/QUICK_START.md",
                "docs/QUICK_START.md".into(),
                "# Quick Start\nSee README.md for setup.\n".to_string(),
            );
        }
        for (name, content) in &options.extra_files {
            put(name, name.clone(), content.clone());
        }

        tracing::info!("Exported project {} ({} files)", config.mod_id, files.len());
        files
    }

    /// Export and hand every file to `sink`. Returns the number of files written.
    pub fn write_to(
        &self,
        config: &ModConfig,
        options: &ExportOptions,
        sink: &mut dyn FileDownloadSink,
    ) -> Result<usize, SinkError> {
        let files = self.export(config, options);
        for (path, content) in &files {
            sink.download(path, content)?;
        }
        Ok(files.len())
    }
}

fn build_gradle(config: &ModConfig) -> String {
    let deps = DependencyVersions::for_minecraft(&config.minecraft_version);
    let mc = &config.minecraft_version;
    format!(
        r#"plugins {{
    id 'fabric-loom' version '{loom}'
    id 'maven-publish'
}}

version = project.mod_version
group = project.maven_group

base {{
    archivesName = project.archives_base_name
}}

repositories {{
    maven {{ name = "Fabric"; url = "https://maven.fabricmc.net/" }}
}}

loom {{
    splitEnvironmentSourceSets()

    mods {{
        "{mod_id}" {{
            sourceSet sourceSets.main
            sourceSet sourceSets.client
        }}
    }}
}}

dependencies {{
    minecraft "com.mojang:minecraft:{mc}"
    mappings "net.fabricmc:yarn:{mc}+build.1:v2"
    modImplementation "net.fabricmc:fabric-loader:{loader}"
    modImplementation "net.fabricmc.fabric-api:fabric-api:{fabric_api}"
}}
"#,
        loom = deps.loom,
        mod_id = config.mod_id,
        loader = FABRIC_LOADER_VERSION,
        fabric_api = deps.fabric_api,
    )
}

fn gradle_properties(config: &ModConfig) -> String {
    let deps = DependencyVersions::for_minecraft(&config.minecraft_version);
    format!(
        "org.gradle.jvmargs=-Xmx1G\n\
         minecraft_version={mc}\n\
         yarn_mappings={mc}+build.1\n\
         loader_version={FABRIC_LOADER_VERSION}\n\
         mod_version={version}\n\
         maven_group={group}\n\
         archives_base_name={mod_id}\n\
         fabric_version={fabric_api}\n",
        mc = config.minecraft_version,
        version = config.version,
        group = config.package_name,
        mod_id = config.mod_id,
        fabric_api = deps.fabric_api,
    )
}

fn fabric_mod_json(config: &ModConfig) -> String {
    let manifest = FabricModJson {
        schema_version: 1,
        id: &config.mod_id,
        // Substituted by Gradle's processResources
        version: "${version}",
        name: &config.mod_name,
        description: &config.description,
        authors: config.author_list(),
        contact: Contact {
            homepage: format!("https://github.com/yourusername/{}", config.mod_id),
            sources: format!("https://github.com/yourusername/{}", config.mod_id),
        },
        license: "MIT",
        icon: format!("assets/{}/icon.png", config.mod_id),
        environment: if config.client_side_only { "client" } else { "*" },
        entrypoints: Entrypoints {
            main: vec![format!("{}.Mod", config.package_name)],
            client: vec![format!("{}.client.ModClient", config.package_name)],
        },
        mixins: vec![format!("{}.mixins.json", config.mod_id)],
        depends: Depends {
            fabricloader: format!(">={FABRIC_LOADER_VERSION}"),
            minecraft: &config.minecraft_version,
            java: ">=21",
            fabric_api: "*",
        },
    };
    // Plain structs of strings always serialize.
    serde_json::to_string_pretty(&manifest).unwrap_or_default()
}

const GITIGNORE: &str = "*.iml
/out
/.idea
/.gradle
/build
!.gradle/wrapper
!.gradle/wrapper/gradle-wrapper.jar
*.class
*.jar
*.log
.DS_Store
.idea/
run/
";

fn readme(config: &ModConfig) -> String {
    format!(
        r#"# {name}

A Fabric mod for Minecraft {mc}.

## Setup

1. Run the Gradle refresh tasks
2. Run `gradlew genSources` to generate IDE workspace
3. Open this directory as a Gradle project

## Building

```bash
gradlew build
```

Output JARs are in `build/libs/`
"#,
        name = config.mod_name,
        mc = config.minecraft_version,
    )
}

fn mod_initializer(config: &ModConfig) -> String {
    format!(
        r#"package {pkg};

import net.fabricmc.api.ModInitializer;
import org.slf4j.Logger;
import org.slf4j.LoggerFactory;

public class Mod implements ModInitializer {{
    public static final String MOD_ID = "{mod_id}";
    public static final Logger LOGGER = LoggerFactory.getLogger(MOD_ID.toUpperCase());

    @Override
    public void onInitialize() {{
        LOGGER.info("{name} initializing!");
        // Register your blocks, items, entities here
    }}
}}
"#,
        pkg = config.package_name,
        mod_id = config.mod_id,
        name = config.mod_name,
    )
}

fn client_initializer(config: &ModConfig) -> String {
    format!(
        r#"package {pkg}.client;

import {pkg}.Mod;
import net.fabricmc.api.ClientModInitializer;
import org.slf4j.Logger;
import org.slf4j.LoggerFactory;

public class ModClient implements ClientModInitializer {{
    public static final Logger LOGGER = LoggerFactory.getLogger(Mod.MOD_ID + "-client");

    @Override
    public void onInitializeClient() {{
        LOGGER.info("{name} client initialized successfully!");
    }}
}}
"#,
        pkg = config.package_name,
        name = config.mod_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_dependency_versions() {
        assert_eq!(DependencyVersions::for_minecraft("1.21.10").loom, "1.7-SNAPSHOT");
        assert_eq!(
            DependencyVersions::for_minecraft("1.21.1").fabric_api,
            "0.100.7+1.21"
        );
    }

    #[test]
    fn test_default_layout() {
        let files = ProjectExporter::new().export(&ModConfig::default(), &ExportOptions::default());
        let paths: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "build.gradle",
                "gradle.properties",
                "src/main/resources/fabric.mod.json",
                ".gitignore",
                "README.md",
                "src/main/java/com/example/Mod.java",
                "src/client/java/com/example/client/ModClient.java",
            ]
        );
        assert!(files["build.gradle"].contains("fabric-loom' version '1.7-SNAPSHOT'"));
    }

    #[test]
    fn test_fabric_mod_json_fields() {
        let config = ModConfig {
            client_side_only: true,
            authors: vec!["Alice".into(), "Bob".into()],
            ..ModConfig::default()
        };
        let files = ProjectExporter::new().export(&config, &ExportOptions::default());
        let json: Value = serde_json::from_str(&files["src/main/resources/fabric.mod.json"]).unwrap();

        assert_eq!(json["schemaVersion"], 1);
        assert_eq!(json["id"], "example-mod");
        assert_eq!(json["version"], "${version}");
        assert_eq!(json["environment"], "client");
        assert_eq!(json["authors"][1], "Bob");
        assert_eq!(json["entrypoints"]["main"][0], "com.example.Mod");
        assert_eq!(json["mixins"][0], "example-mod.mixins.json");
        assert_eq!(json["depends"]["fabricloader"], ">=0.16.7");
        assert_eq!(json["depends"]["fabric-api"], "*");
        assert_eq!(
            json["contact"]["homepage"],
            "https://github.com/yourusername/example-mod"
        );
    }

    #[test]
    fn test_folder_map_docs_and_extras() {
        let mut options = ExportOptions {
            include_docs: true,
            ..ExportOptions::default()
        };
        options
            .folder_map
            .insert("README.md".into(), "docs/README.md".into());
        options
            .folder_map
            .insert("notes.txt".into(), "misc/notes.txt".into());
        options.extra_files.insert("notes.txt".into(), "hi".into());

        let files = ProjectExporter::new().export(&ModConfig::default(), &options);
        assert!(files.contains_key("docs/README.md"));
        assert!(!files.contains_key("README.md"));
        assert!(files.contains_key("docs/QUICK_START.md"));
        assert_eq!(files["misc/notes.txt"], "hi");
    }
}
