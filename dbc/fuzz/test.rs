#![cfg(test)]

use canconv_dbc::prelude::*;

#[test]
fn test_all() {
    match std::fs::read_dir("./corpus/generate") {
        Err(e) => {
            eprintln!(
                "Failed to open dir: {e}, curr dir: {}",
                std::env::current_dir().unwrap().to_string_lossy()
            );
        }
        Ok(dir) => {
            for entry in dir.flatten() {
                let path = entry.path();
                if path.is_file()
                    && let Ok(data) = std::fs::read(&path)
                    && let Ok(network) = serde_json::from_slice::<Network>(&data)
                {
                    let generator = Generator::new();
                    if let Ok(first) = generator.render(&network) {
                        assert_eq!(generator.render(&network).ok(), Some(first));
                    }
                }
            }
        }
    }
}
