//! End-to-end tests: reads tiled from a reference go through the read encoder,
//! a small greedy engine and the assembly decoder, and come back as contigs.

use fermigraph_assembler::{Assembler, Engine};
use fermigraph_core::models::{Assembly, Connection, Contig, SequencedRead};
use fermigraph_io::consts::OPTIONS_BLOCK_LEN;
use fermigraph_io::{AssemblerOptions, FermiError, decode_reads, encode_assembly, to_gfa_string};
use pretty_assertions::assert_eq;
use rstest::*;

const REFERENCE: &[u8] = b"ACGTTGCATGCAAGTCCGATAGCTTACGGATCCATGACGTAGGCTTAACGTCAGT";
static QUALS: [u8; 20] = [30; 20];

/// Greedy engine: extends one contig per run of reads that overlap by at least
/// `min_asm_ovlp`, and links consecutive contigs with a zero-length overlap.
struct TilingEngine;

impl TilingEngine {
    fn overlap(contig: &[u8], read: &[u8], min_overlap: usize) -> Option<usize> {
        (min_overlap..read.len().min(contig.len()) + 1)
            .rev()
            .find(|&k| contig.ends_with(&read[..k]))
    }
}

impl Engine for TilingEngine {
    fn assemble(&mut self, options: &[u8; OPTIONS_BLOCK_LEN], reads: &[u8]) -> Option<Vec<u8>> {
        let options = AssemblerOptions::from_bytes(options).ok()?;
        let min_overlap = options.min_asm_ovlp.max(1) as usize;
        let reads = decode_reads(reads).ok()?;
        if reads.is_empty() {
            return None;
        }

        // (sequence, coverage, read count)
        let mut runs: Vec<(Vec<u8>, Vec<u8>, u32)> = Vec::new();
        for read in reads {
            let merged = runs.last_mut().and_then(|(seq, cov, count)| {
                let k = Self::overlap(seq, &read.bases, min_overlap)?;
                let start = seq.len() - k;
                seq.extend_from_slice(&read.bases[k..]);
                cov.resize(seq.len(), 0);
                for c in &mut cov[start..] {
                    *c = c.saturating_add(1);
                }
                *count += 1;
                Some(())
            });
            if merged.is_none() {
                let len = read.bases.len();
                runs.push((read.bases, vec![1; len], 1));
            }
        }

        let last = runs.len() - 1;
        let contigs = runs
            .into_iter()
            .enumerate()
            .map(|(idx, (seq, cov, count))| {
                let mut contig = Contig::new(seq, cov, count).ok()?;
                let mut connections = Vec::new();
                if idx > 0 {
                    connections.push(Connection::new(idx - 1, 0, true, false));
                }
                if idx < last {
                    connections.push(Connection::new(idx + 1, 0, false, true));
                }
                contig.set_connections(connections).ok()?;
                Some(contig)
            })
            .collect::<Option<Vec<_>>>()?;

        encode_assembly(&Assembly::new(contigs).ok()?).ok()
    }

    fn name(&self) -> &str {
        "tiling engine"
    }
}

fn tile(reference: &[u8], read_len: usize, step: usize) -> Vec<SequencedRead> {
    let mut reads: Vec<SequencedRead> = (0..=reference.len() - read_len)
        .step_by(step)
        .map(|start| {
            SequencedRead::with_constant_quality(reference[start..start + read_len].to_vec(), 30)
        })
        .collect();
    // make sure the tail of the reference is covered
    let tail = &reference[reference.len() - read_len..];
    if reads.last().map(|r| r.bases.as_slice()) != Some(tail) {
        reads.push(SequencedRead::with_constant_quality(tail.to_vec(), 30));
    }
    reads
}

#[fixture]
fn assembler() -> Assembler<TilingEngine> {
    let mut assembler = Assembler::new(TilingEngine);
    assembler.options_mut().min_asm_ovlp = 10;
    assembler
}

#[rstest]
fn test_tiled_reads_rebuild_reference(mut assembler: Assembler<TilingEngine>) {
    let reads = tile(REFERENCE, 20, 4);
    let assembly = assembler.create_assembly(&reads).unwrap();

    assert_eq!(assembly.len(), 1);
    let contig = assembly.contig(0).unwrap();
    assert_eq!(contig.sequence(), REFERENCE);
    assert_eq!(contig.supporting_read_count() as usize, reads.len());
    assert!(contig.connections().is_empty());
    assert_eq!(assembly.size_statistic().unwrap(), REFERENCE.len());
}

#[rstest]
fn test_projection_from_plain_sequences(mut assembler: Assembler<TilingEngine>) {
    let sequences: Vec<String> = tile(REFERENCE, 20, 4)
        .into_iter()
        .map(|r| String::from_utf8(r.bases).unwrap())
        .collect();

    let assembly = assembler
        .create_assembly_with(&sequences, |seq| (seq.as_bytes(), &QUALS[..seq.len()]))
        .unwrap();
    assert_eq!(assembly.contig(0).unwrap().sequence(), REFERENCE);
}

#[rstest]
fn test_unrelated_reads_make_linked_contigs(mut assembler: Assembler<TilingEngine>) {
    let mut reads = tile(&REFERENCE[..30], 15, 3);
    reads.extend(tile(b"TTTTTTTTTTTTTTTTGGGGGGGGGGGGGGGG", 16, 4));
    let assembly = assembler.create_assembly(&reads).unwrap();

    assert_eq!(assembly.len(), 2);
    assert_eq!(assembly.contig(0).unwrap().sequence(), &REFERENCE[..30]);
    assert_eq!(assembly.size_statistic().unwrap(), 32);

    let first = assembly.contig(0).unwrap();
    let successor = first.sole_successor().single().unwrap();
    assert_eq!(assembly.target(successor).len(), 32);
    assert_eq!(
        successor.reversed(0),
        assembly.contig(1).unwrap().connections()[0]
    );
    assert!(to_gfa_string(&assembly).contains("L\ttig0\t+\ttig1\t-\t0M\n"));
}

#[rstest]
fn test_no_reads_is_assembly_failure(mut assembler: Assembler<TilingEngine>) {
    let reads: Vec<SequencedRead> = vec![];
    assert!(matches!(
        assembler.create_assembly(&reads),
        Err(FermiError::AssemblyFailure)
    ));
}
