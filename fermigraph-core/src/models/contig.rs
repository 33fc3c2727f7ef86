use std::fmt::{self, Display};

use crate::errors::{GraphError, Result};

///
/// One end of an overlap between two contigs, as seen by the contig that owns it.
///
/// The target is addressed by its index in the owning [`Assembly`](super::Assembly).
/// A physical overlap is described twice, once in each endpoint's list.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    target: usize,
    overlap_len: i32,
    is_rc: bool,
    is_target_rc: bool,
}

impl Connection {
    pub fn new(target: usize, overlap_len: i32, is_rc: bool, is_target_rc: bool) -> Self {
        Connection {
            target,
            overlap_len,
            is_rc,
            is_target_rc,
        }
    }

    /// Index of the contig this connection points at.
    pub fn target(&self) -> usize {
        self.target
    }

    ///
    /// Bases shared with the target.
    ///
    /// Decoded connections are never negative: the wire format spends the sign bit
    /// on the `is_rc` flag. A negative value can only come from a hand-built
    /// connection and is rendered as a gap by the GFA writer.
    ///
    pub fn overlap_len(&self) -> i32 {
        self.overlap_len
    }

    /// True if the target is upstream of this contig's 5' end.
    pub fn is_rc(&self) -> bool {
        self.is_rc
    }

    /// True if the connection lands on the reverse complement of the target.
    pub fn is_target_rc(&self) -> bool {
        self.is_target_rc
    }

    ///
    /// Express this connection from the target's side.
    ///
    /// `owner` is the index of the contig whose list holds `self`. The result points
    /// back at the owner with the two orientation flags swapped.
    ///
    pub fn reversed(&self, owner: usize) -> Connection {
        Connection {
            target: owner,
            overlap_len: self.overlap_len,
            is_rc: self.is_target_rc,
            is_target_rc: self.is_rc,
        }
    }
}

///
/// Result of asking a contig for its only connection on one side.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoleConnection<'a> {
    /// Nothing attaches on that side.
    None,
    /// Exactly one connection: a linear stretch of the graph.
    One(&'a Connection),
    /// Two or more connections: a branch point.
    Ambiguous,
}

impl<'a> SoleConnection<'a> {
    pub fn single(self) -> Option<&'a Connection> {
        match self {
            SoleConnection::One(connection) => Some(connection),
            SoleConnection::None | SoleConnection::Ambiguous => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, SoleConnection::Ambiguous)
    }
}

///
/// An assembled sequence with per-base coverage and its overlap connections.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    sequence: Vec<u8>,
    per_base_coverage: Vec<u8>,
    supporting_read_count: u32,
    connections: Vec<Connection>,
    connected: bool,
}

impl Contig {
    ///
    /// Create a contig with no connections yet.
    ///
    /// # Arguments
    /// - sequence: base calls
    /// - per_base_coverage: one coverage byte per base
    /// - supporting_read_count: number of reads the engine used for this contig
    ///
    pub fn new(
        sequence: Vec<u8>,
        per_base_coverage: Vec<u8>,
        supporting_read_count: u32,
    ) -> Result<Self> {
        if sequence.len() != per_base_coverage.len() {
            return Err(GraphError::CoverageLengthMismatch {
                sequence: sequence.len(),
                coverage: per_base_coverage.len(),
            });
        }

        Ok(Contig {
            sequence,
            per_base_coverage,
            supporting_read_count,
            connections: Vec::new(),
            connected: false,
        })
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn per_base_coverage(&self) -> &[u8] {
        &self.per_base_coverage
    }

    pub fn supporting_read_count(&self) -> u32 {
        self.supporting_read_count
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    ///
    /// Connections in the order the engine reported them. Empty until assigned.
    ///
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    ///
    /// Attach the connection list. This can only happen once per contig.
    ///
    pub fn set_connections(&mut self, connections: Vec<Connection>) -> Result<()> {
        if self.connected {
            return Err(GraphError::ConnectionsAlreadySet);
        }
        self.connections = connections;
        self.connected = true;
        Ok(())
    }

    ///
    /// Average of the per-base coverage bytes, or 0.0 for an empty contig.
    ///
    pub fn mean_coverage(&self) -> f64 {
        if self.per_base_coverage.is_empty() {
            return 0.0;
        }
        let total: u64 = self.per_base_coverage.iter().map(|&c| c as u64).sum();
        total as f64 / self.per_base_coverage.len() as f64
    }

    ///
    /// The one connection whose `is_rc` flag equals `is_rc`, if there is exactly one.
    ///
    pub fn singleton_connection(&self, is_rc: bool) -> SoleConnection<'_> {
        let mut singleton = SoleConnection::None;
        for connection in self.connections() {
            if connection.is_rc() == is_rc {
                if let SoleConnection::One(_) = singleton {
                    return SoleConnection::Ambiguous;
                }
                singleton = SoleConnection::One(connection);
            }
        }
        singleton
    }

    pub fn sole_predecessor(&self) -> SoleConnection<'_> {
        self.singleton_connection(true)
    }

    pub fn sole_successor(&self) -> SoleConnection<'_> {
        self.singleton_connection(false)
    }
}

impl Display for Contig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contig of {} bases from {} reads with {} connections.",
            self.len(),
            self.supporting_read_count,
            self.connections().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn contig() -> Contig {
        Contig::new(b"ACGTACGTAC".to_vec(), vec![5; 10], 7).unwrap()
    }

    #[rstest]
    fn test_new_rejects_misaligned_coverage() {
        let result = Contig::new(b"ACGT".to_vec(), vec![1; 3], 1);
        assert_eq!(
            result.unwrap_err(),
            GraphError::CoverageLengthMismatch {
                sequence: 4,
                coverage: 3
            }
        );
    }

    #[rstest]
    fn test_connections_start_empty(contig: Contig) {
        assert!(contig.connections().is_empty());
        assert_eq!(contig.sole_successor(), SoleConnection::None);
        assert_eq!(contig.sole_predecessor(), SoleConnection::None);
    }

    #[rstest]
    fn test_connections_assigned_once(mut contig: Contig) {
        contig
            .set_connections(vec![Connection::new(0, 3, false, false)])
            .unwrap();
        let again = contig.set_connections(vec![]);
        assert_eq!(again.unwrap_err(), GraphError::ConnectionsAlreadySet);
        assert_eq!(contig.connections().len(), 1);
    }

    #[rstest]
    fn test_singleton_connection(mut contig: Contig) {
        let successor = Connection::new(1, 12, false, true);
        contig
            .set_connections(vec![
                Connection::new(2, 9, true, false),
                successor,
                Connection::new(3, 4, true, true),
            ])
            .unwrap();

        assert_eq!(contig.sole_successor(), SoleConnection::One(&successor));
        assert_eq!(contig.sole_successor().single(), Some(&successor));
        assert!(contig.sole_predecessor().is_ambiguous());
        assert_eq!(contig.singleton_connection(true).single(), None);
    }

    #[rstest]
    fn test_reversed_swaps_flags() {
        let connection = Connection::new(4, 21, true, false);
        let reversed = connection.reversed(9);

        assert_eq!(reversed.target(), 9);
        assert_eq!(reversed.overlap_len(), 21);
        assert_eq!(reversed.is_rc(), false);
        assert_eq!(reversed.is_target_rc(), true);
        assert_eq!(reversed.reversed(4), connection);
    }

    #[rstest]
    fn test_mean_coverage() {
        let contig = Contig::new(b"ACG".to_vec(), vec![1, 2, 6], 2).unwrap();
        assert_eq!(contig.mean_coverage(), 3.0);

        let empty = Contig::new(vec![], vec![], 0).unwrap();
        assert_eq!(empty.mean_coverage(), 0.0);
        assert!(empty.is_empty());
    }
}
