use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    // 告诉 Cargo 当 locales 目录改变时重新运行 build script
    println!("cargo:rerun-if-changed=locales");

    let locales_dir = Path::new("locales");
    let mut entries: Vec<(String, String)> = Vec::new();

    if locales_dir.is_dir() {
        match fs::read_dir(locales_dir) {
            Ok(dir) => {
                for entry in dir.flatten() {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    let code = match path.file_stem().and_then(|s| s.to_str()) {
                        Some(code) => code.to_string(),
                        None => continue,
                    };

                    // 语言包必须是 JSON 对象，否则直接让构建失败
                    let content = fs::read_to_string(&path)
                        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
                    match serde_json::from_str::<Value>(&content) {
                        Ok(Value::Object(_)) => {}
                        Ok(_) => panic!("Locale bundle {} is not a JSON object", path.display()),
                        Err(e) => panic!("Failed to parse {}: {}", path.display(), e),
                    }

                    println!("cargo:rerun-if-changed={}", path.display());
                    let relative = format!("/locales/{}.json", code);
                    entries.push((code, relative));
                }
            }
            Err(e) => {
                println!("cargo:warning=Failed to read locales directory: {}", e);
            }
        }
    } else {
        println!("cargo:warning=locales directory not found, no bundles embedded");
    }

    // 保证生成结果稳定
    entries.sort();

    let mut generated = String::from("/// 构建时生成的内置语言包 (语言代码, JSON 内容)\n");
    generated.push_str("pub const EMBEDDED_LOCALES: &[(&str, &str)] = &[\n");
    for (code, relative) in &entries {
        generated.push_str(&format!(
            "    ({:?}, include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), {:?}))),\n",
            code, relative
        ));
    }
    generated.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("embedded_locales.rs"), generated)
        .expect("Failed to write embedded_locales.rs");
}
