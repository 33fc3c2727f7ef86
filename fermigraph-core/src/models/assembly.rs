use std::fmt::{self, Display};

use log::debug;

use crate::errors::{GraphError, Result};
use crate::models::contig::{Connection, Contig};

///
/// Assembly struct, an ordered and immutable list of contigs.
///
/// A contig's identity is its position in the list. Connections refer to their
/// targets by that position, so every target is guaranteed to be in range once
/// the assembly has been built.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assembly {
    contigs: Vec<Contig>,
}

impl Assembly {
    ///
    /// Wrap a list of contigs, checking that every connection target exists.
    ///
    pub fn new(contigs: Vec<Contig>) -> Result<Self> {
        let len = contigs.len();
        for (idx, contig) in contigs.iter().enumerate() {
            if let Some(dangling) = contig.connections().iter().find(|c| c.target() >= len) {
                return Err(GraphError::DanglingConnection {
                    contig: idx,
                    target: dangling.target(),
                    len,
                });
            }
        }
        Ok(Assembly { contigs })
    }

    /// Number of contigs.
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contig> {
        self.contigs.iter()
    }

    ///
    /// Get the contig at `index`.
    ///
    pub fn contig(&self, index: usize) -> Result<&Contig> {
        self.contigs.get(index).ok_or(GraphError::IndexOutOfRange {
            index,
            len: self.contigs.len(),
        })
    }

    ///
    /// Resolve the contig a connection points at.
    ///
    /// Every connection held by this assembly has an in-range target, so this
    /// only panics for a connection that belongs to a different assembly.
    ///
    pub fn target(&self, connection: &Connection) -> &Contig {
        &self.contigs[connection.target()]
    }

    ///
    /// Sum of all contig lengths.
    ///
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|c| c.len() as u64).sum()
    }

    ///
    /// Number of connection records across all contigs. Each physical overlap is
    /// counted once per endpoint.
    ///
    pub fn connection_count(&self) -> usize {
        self.contigs.iter().map(|c| c.connections().len()).sum()
    }

    ///
    /// Length-weighted contig size summary (N50-like).
    ///
    /// With no contigs this is 0 and with one contig it is that contig's length.
    /// Otherwise lengths are scanned from longest to shortest, adding twice each
    /// length to a running sum, and the first length at which the running sum
    /// reaches the total of all lengths is returned.
    ///
    pub fn size_statistic(&self) -> Result<usize> {
        match self.contigs.len() {
            0 => return Ok(0),
            1 => return Ok(self.contigs[0].len()),
            _ => {}
        }

        let mut lengths: Vec<usize> = self.contigs.iter().map(Contig::len).collect();
        lengths.sort_unstable();
        let total: u64 = lengths.iter().map(|&l| l as u64).sum();

        let mut running: u64 = 0;
        for &length in lengths.iter().rev() {
            running += 2 * length as u64;
            if running >= total {
                debug!(
                    "Size statistic over {} contigs ({} bases): {}",
                    lengths.len(),
                    total,
                    length
                );
                return Ok(length);
            }
        }

        Err(GraphError::SizeStatisticInvariant { total })
    }
}

impl<'a> IntoIterator for &'a Assembly {
    type Item = &'a Contig;
    type IntoIter = std::slice::Iter<'a, Contig>;

    fn into_iter(self) -> Self::IntoIter {
        self.contigs.iter()
    }
}

impl Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Assembly with {} contigs.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn contig_of_len(len: usize) -> Contig {
        Contig::new(vec![b'A'; len], vec![1; len], 1).unwrap()
    }

    fn assembly_of_lengths(lengths: &[usize]) -> Assembly {
        Assembly::new(lengths.iter().map(|&l| contig_of_len(l)).collect()).unwrap()
    }

    #[rstest]
    fn test_empty_assembly_statistic_is_zero() {
        let assembly = Assembly::default();
        assert!(assembly.is_empty());
        assert_eq!(assembly.size_statistic().unwrap(), 0);
    }

    #[rstest]
    fn test_single_contig_statistic_is_its_length() {
        let assembly = assembly_of_lengths(&[137]);
        assert_eq!(assembly.size_statistic().unwrap(), 137);
    }

    #[rstest]
    #[case(vec![10, 20, 70], 70)]
    #[case(vec![70, 10, 20], 70)]
    #[case(vec![40, 30, 30], 30)]
    #[case(vec![25, 25, 25, 25], 25)]
    #[case(vec![0, 0], 0)]
    fn test_size_statistic(#[case] lengths: Vec<usize>, #[case] expected: usize) {
        let assembly = assembly_of_lengths(&lengths);
        assert_eq!(assembly.size_statistic().unwrap(), expected);
    }

    #[rstest]
    fn test_contig_index_out_of_range() {
        let assembly = assembly_of_lengths(&[5, 6]);
        assert_eq!(assembly.contig(1).unwrap().len(), 6);
        assert_eq!(
            assembly.contig(2).unwrap_err(),
            GraphError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[rstest]
    fn test_new_rejects_dangling_connection() {
        let mut first = contig_of_len(4);
        first
            .set_connections(vec![Connection::new(3, 2, false, false)])
            .unwrap();
        let result = Assembly::new(vec![first, contig_of_len(4)]);
        assert_eq!(
            result.unwrap_err(),
            GraphError::DanglingConnection {
                contig: 0,
                target: 3,
                len: 2
            }
        );
    }

    #[rstest]
    fn test_target_and_totals() {
        let mut first = contig_of_len(8);
        let mut second = contig_of_len(3);
        first
            .set_connections(vec![Connection::new(1, 2, false, false)])
            .unwrap();
        second
            .set_connections(vec![Connection::new(0, 2, true, false)])
            .unwrap();
        let assembly = Assembly::new(vec![first, second]).unwrap();

        let connection = assembly.contig(0).unwrap().connections()[0];
        assert_eq!(assembly.target(&connection).len(), 3);
        assert_eq!(assembly.total_length(), 11);
        assert_eq!(assembly.connection_count(), 2);
        assert_eq!(assembly.to_string(), "Assembly with 2 contigs.");
    }
}
