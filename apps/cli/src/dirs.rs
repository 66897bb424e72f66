use std::path::PathBuf;

const DATA_DIR_NAME: &str = "revisent";

pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    if let Some(base) = std::env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base).join(DATA_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(DATA_DIR_NAME))
}
