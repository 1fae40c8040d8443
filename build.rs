use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

fn main() {
    // The bundled ADF conversion defaults must parse and carry every section
    // Config::compiled_default reads.
    println!("cargo:rerun-if-changed={}", CONFIG_PATH);

    let content = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("cannot read bundled conversion defaults {CONFIG_PATH}: {e}"));

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("bundled conversion defaults {CONFIG_PATH} are not valid TOML: {e}"),
    };

    for section in ["markdown", "limits", "output"] {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("bundled conversion defaults {CONFIG_PATH} lack the [{section}] table");
        }
    }
}
