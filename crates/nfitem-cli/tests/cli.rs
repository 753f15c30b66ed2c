use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "\
DANFE DOCUMENTO AUXILIAR DA NOTA FISCAL ELETRÔNICA
N. 000.045.812 SÉRIE 1
DESTINATÁRIO EMPRESA EXEMPLO LTDA FILIAL 07
CÁLCULO DO IMPOSTO
VALOR DO FRETE 15,00 VALOR DO SEGURO 0,00
DADOS DOS PRODUTOS/SERVIÇOS
1001 21,90 5,00 UN ACUCAR CRISTAL 5KG PAINEIRAS 109,50
1002 DETERGENTE NEUTRO 500ML 2,79 24,00 UN 66,96
1003 ESPONJA DUPLA FACE 1,99 10,00 PC 19,90
CÁLCULO DO ICMS RETIDO
";

fn nfitem(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nfitem").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("nota.txt");
    fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn test_process_text_report() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    nfitem(dir.path())
        .args(["process", "--period", "Dezembro/2025"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "5 ACUCAR CRISTAL 5KG PAINEIRAS, alocados direto na FL07",
        ))
        .stdout(predicate::str::contains("referente a Dezembro/2025 - NF000045812"))
        .stdout(predicate::str::contains("TOTAL ALVOS: R$ 109,50"))
        .stdout(predicate::str::contains("TOTAL LIMPEZA (sem frete): R$ 86,86"))
        .stdout(predicate::str::contains("FRETE: R$ 15,00"))
        .stdout(predicate::str::contains("TOTAL LIMPEZA + FRETE: R$ 101,86"));
}

#[test]
fn test_process_top_limits_remaining_items() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    nfitem(dir.path())
        .args(["process", "--top", "1", "--period", "Janeiro/2026"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("24 DETERGENTE NEUTRO 500ML, alocados"))
        .stdout(predicate::str::contains("ESPONJA DUPLA FACE").not());
}

#[test]
fn test_process_json_output_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("out.json");

    nfitem(dir.path())
        .args(["process", "-f", "json", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["report"]["invoice_number"], "000045812");
    assert_eq!(json["report"]["branch"], "FL07");
    assert_eq!(json["items"].as_array().unwrap().len(), 3);
}

#[test]
fn test_process_csv_output() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    nfitem(dir.path())
        .args(["process", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "description,normalized_description,unit,unit_price,quantity,total",
        ))
        .stdout(predicate::str::contains(
            "ESPONJA DUPLA FACE,ESPONJA DUPLA FACE,PC,1.99,10.00,19.90",
        ));
}

#[test]
fn test_process_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    nfitem(dir.path())
        .args(["process"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_blank_file_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("blank.txt");
    fs::write(&input, "  \n").unwrap();

    nfitem(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text could be extracted"));
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "report.supplier", "Limpa Tudo"])
        .assert()
        .success();

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "report.supplier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Limpa Tudo\""));

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "extraction.unit_tokens", r#"["U N"]"#])
        .assert()
        .failure();

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "report.unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_process_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"report": {"supplier": "Limpa Tudo", "reference_period": "Marco/2026"}}"#,
    )
    .unwrap();

    nfitem(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("referente a Marco/2026"))
        .stdout(predicate::str::contains("Fornecedor Limpa Tudo."));
}
