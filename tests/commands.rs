use clap::Parser;
use phylobusco::cli::{Cli, Command};
use phylobusco::commands::{concat, select};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{self, Stdio},
};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn run_concat(args: &[String]) -> phylobusco::utils::Result<()> {
    let argv = ["phylobusco".to_string(), "concat".to_string()]
        .into_iter()
        .chain(args.iter().cloned());
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Concat(args) => concat::concat(args),
        _ => panic!("expected concat"),
    }
}

fn run_select(args: &[String]) -> phylobusco::utils::Result<()> {
    let argv = ["phylobusco".to_string(), "select".to_string()]
        .into_iter()
        .chain(args.iter().cloned());
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Select(args) => select::select(args),
        _ => panic!("expected select"),
    }
}

/// Two genes, `geneB` lacking taxon `y`; returns the list and both alignment paths.
fn two_gene_alignments(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let gene_a = dir.join("aln").join("geneA.fasta.aln");
    let gene_b = dir.join("aln").join("geneB.aln");
    write(&gene_a, ">x\nAC\n>y\nAG\n");
    write(&gene_b, ">x\nTTT\n");
    let list = dir.join("alignments.txt");
    write(&list, &format!("{}\n{}\n", gene_a.display(), gene_b.display()));
    (list, gene_a, gene_b)
}

#[test]
fn concat_without_model_list_writes_no_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let (list, _, _) = two_gene_alignments(dir.path());
    let out = dir.path().join("super_BUSCO_matrix.faa");
    let scheme = dir.path().join("best_BUSCO_scheme.txt");

    run_concat(&[arg(&list), "-o".into(), arg(&out), "-p".into(), arg(&scheme)]).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), ">x\nACTTT\n>y\nAG---\n");
    assert!(!scheme.exists());
}

#[test]
fn concat_with_model_list_writes_matching_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let (list, gene_a, gene_b) = two_gene_alignments(dir.path());
    let models = dir.path().join("models.txt");
    write(
        &models,
        &format!("{} LG\n{} WAG\n", gene_b.display(), gene_a.display()),
    );
    let out = dir.path().join("matrix.faa");
    let scheme = dir.path().join("scheme.txt");

    run_concat(&[
        arg(&list),
        "-o".into(),
        arg(&out),
        "-m".into(),
        arg(&models),
        "-p".into(),
        arg(&scheme),
    ])
    .unwrap();

    let matrix = fs::read_to_string(&out).unwrap();
    assert_eq!(matrix, ">x\nTTTAC\n>y\n---AG\n");
    let scheme = fs::read_to_string(&scheme).unwrap();
    assert_eq!(scheme, "LG, partition1 = 1-3\nWAG, partition2 = 4-5\n");

    let width = matrix.lines().nth(1).unwrap().len();
    let last_end = scheme.lines().last().unwrap().rsplit('-').next().unwrap();
    assert_eq!(last_end.parse::<usize>().unwrap(), width);
}

#[test]
fn concat_model_list_with_unloaded_gene_err() {
    let dir = tempfile::tempdir().unwrap();
    let (list, gene_a, _) = two_gene_alignments(dir.path());
    let models = dir.path().join("models.txt");
    write(
        &models,
        &format!("{} GTR\n{} GTR\n", gene_a.display(), dir.path().join("geneZ.aln").display()),
    );
    let scheme = dir.path().join("scheme.txt");

    let result = run_concat(&[
        arg(&list),
        "-o".into(),
        arg(&dir.path().join("matrix.faa")),
        "-m".into(),
        arg(&models),
        "-p".into(),
        arg(&scheme),
    ]);
    assert_eq!(
        result,
        Err("Alignment geneZ listed in the model list was not loaded".to_string())
    );
    assert!(!scheme.exists());
}

#[test]
fn concat_empty_list_err() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("alignments.txt");
    write(&list, "\n\n");
    let result = run_concat(&[arg(&list), "-o".into(), arg(&dir.path().join("m.faa"))]);
    assert!(result.unwrap_err().starts_with("No alignment files listed in"));
}

/// Five taxa; `g1` complete in four of them, `g2` in two.
fn busco_results(dir: &Path) -> (PathBuf, PathBuf) {
    let mut labels = String::new();
    for (label, g1, g2) in [
        ("GCA_1", "Complete", "Complete"),
        ("GCA_2", "Complete", "Missing"),
        ("GCA_3", "Fragmented", "Duplicated"),
        ("GCA_4", "Complete", "Missing"),
        ("GCA_5", "Complete", "Complete"),
    ] {
        let run_dir = dir.join(label).join("run_fungi_odb10");
        let full_table = run_dir.join("full_table.tsv");
        write(
            &full_table,
            &format!("# Busco id\tStatus\tSequence\ng1\t{}\tc1\ng2\t{}\tc2\n", g1, g2),
        );
        let seq_dir = run_dir.join("busco_sequences/single_copy_busco_sequences");
        write(&seq_dir.join("g1.faa"), ">g1\nmkv\n");
        write(&seq_dir.join("g2.faa"), ">g2\nww\n");
        labels.push_str(&format!("{}\t{}\n", label, full_table.display()));
    }
    let label_list = dir.join("labels.txt");
    write(&label_list, &labels);
    let desc = dir.join("busco_desc.txt");
    write(
        &desc,
        "g1\tfirst gene\thttps://www.orthodb.org/v10?query=g1\n\
         g2\tsecond gene\thttps://www.orthodb.org/v10?query=g2\n",
    );
    (label_list, desc)
}

#[test]
fn select_writes_matrix_and_datasets() {
    let dir = tempfile::tempdir().unwrap();
    let (labels, desc) = busco_results(dir.path());
    let matrix = dir.path().join("busco_full_matrix.tsv");
    let out_dir = dir.path().join("datasets");

    run_select(&[
        arg(&labels),
        "-B".into(),
        arg(&desc),
        "-o".into(),
        arg(&matrix),
        "-O".into(),
        arg(&out_dir),
    ])
    .unwrap();

    let text = fs::read_to_string(&matrix).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("g1\thttps://www.orthodb.org/v10?query=g1\tfirst gene\t4\t80.00\t"));
    assert_eq!(
        fs::read_to_string(out_dir.join("g1.faa")).unwrap(),
        ">GCA_1\nMKV\n>GCA_2\nMKV\n>GCA_4\nMKV\n>GCA_5\nMKV\n"
    );
    assert!(!out_dir.join("g2.faa").exists());
}

#[test]
fn select_writes_full_matrix_when_every_gene_is_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let (labels, desc) = busco_results(dir.path());
    let matrix = dir.path().join("busco_full_matrix.tsv");
    let out_dir = dir.path().join("datasets");

    run_select(&[
        arg(&labels),
        "-B".into(),
        arg(&desc),
        "-o".into(),
        arg(&matrix),
        "-t".into(),
        "100".into(),
        "-O".into(),
        arg(&out_dir),
    ])
    .unwrap();

    let text = fs::read_to_string(&matrix).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("g1\t"));
    assert!(lines[2].starts_with("g2\t"));
    assert!(out_dir.is_dir());
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn binary_reads_alignment_list_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (list, _, _) = two_gene_alignments(dir.path());
    let out = dir.path().join("from_stdin.faa");

    let mut child = process::Command::new(env!("CARGO_BIN_EXE_phylobusco"))
        .args(["concat", "-", "-o"])
        .arg(&out)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(fs::read_to_string(&list).unwrap().as_bytes())
        .unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(&out).unwrap(), ">x\nACTTT\n>y\nAG---\n");
}

#[test]
fn binary_exits_non_zero_on_missing_alignment() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("alignments.txt");
    write(&list, &format!("{}\n", dir.path().join("missing.aln").display()));

    let status = process::Command::new(env!("CARGO_BIN_EXE_phylobusco"))
        .arg("concat")
        .arg(&list)
        .arg("-o")
        .arg(dir.path().join("matrix.faa"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    assert!(!dir.path().join("matrix.faa").exists());
}
