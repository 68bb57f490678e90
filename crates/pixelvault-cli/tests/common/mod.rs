// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "PIXELVAULT_LOG_LEVEL",
    "PIXELVAULT_DATA_DIR",
    "PIXELVAULT_CONFIG",
    "PIXELVAULT_TAX_RATE",
    "PIXELVAULT_PAGE_SIZE",
];

fn game(
    id: &str,
    title: &str,
    price: f64,
    category: &str,
    platforms: &[&str],
    scores: (f64, f64),
    released: &str,
) -> Value {
    json!({
        "uniqueIdentifier": id,
        "title": title,
        "description": format!("{title} for the whole crew."),
        "price": price,
        "originalPrice": price,
        "discountPercentage": 0,
        "category": category,
        "platforms": platforms,
        "userScore": scores.0,
        "criticScore": scores.1,
        "releaseDate": released,
        "image": format!("images/{id}.jpg"),
    })
}

pub fn catalog_json() -> Value {
    let mut starfall = game(
        "starfall",
        "Starfall Chronicles",
        39.99,
        "RPG",
        &["PC", "PlayStation"],
        (9.1, 88.0),
        "2024-03-01",
    );
    starfall["originalPrice"] = json!(59.99);
    starfall["discountPercentage"] = json!(33);
    json!({
        "collectionRoot": {
            "entertainmentItems": [
                starfall,
                game("turbo", "Turbo Drift", 19.99, "Racing", &["PC", "Xbox"], (7.5, 72.0), "2023-11-10"),
                game("kingdoms", "Iron Kingdoms", 49.99, "Strategy", &["PC"], (8.2, 81.0), "2024-01-15"),
                game("neon", "Neon Rally", 29.99, "Racing", &["Xbox", "Switch"], (6.9, 65.0), "2022-06-01"),
                game("dragon", "Dragonbound", 69.99, "RPG", &["PC", "PlayStation"], (8.8, 90.0), "2024-05-20"),
                game("farm", "Pixel Farm", 14.99, "Simulation", &["Switch"], (8.0, 78.0), "2021-09-09"),
                game("siege", "Siege Lords", 59.99, "Strategy", &["PC", "Xbox"], (7.2, 70.0), "2023-02-02"),
                game("orbit", "Orbit Tycoon", 24.99, "Simulation", &["PC"], (7.8, 75.0), "2024-04-04"),
            ]
        }
    })
}

/// A throwaway storefront: catalog file, data directory and an absent config.
pub struct Shop {
    pub dir: TempDir,
}

impl Shop {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let raw = serde_json::to_vec_pretty(&catalog_json()).expect("catalog json");
        fs::write(dir.path().join("catalog.json"), raw).expect("write catalog");
        Self { dir }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.path().join("catalog.json")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pixelvault"));
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--config")
            .arg(self.config_path())
            .arg("--catalog")
            .arg(self.catalog_path());
        cmd
    }

    /// Runs a `--json` command that must succeed and parses its stdout.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().arg("--json").args(args).output().expect("run");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("json stdout")
    }

    /// Runs a `--json` command that must fail, returning the exit code and
    /// the machine error from stderr.
    pub fn json_err(&self, args: &[&str]) -> (i32, Value) {
        let output = self.cmd().arg("--json").args(args).output().expect("run");
        assert!(!output.status.success(), "{args:?} unexpectedly succeeded");
        let code = output.status.code().expect("exit code");
        let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
        let line = stderr
            .lines()
            .rev()
            .find(|l| l.starts_with('{'))
            .expect("machine error line");
        (code, serde_json::from_str(line).expect("machine error json"))
    }
}

pub fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|v| (v - expected).abs() < 1e-6)
}
