//! The circuit-as-data representation of a joint computation.

/// Opaque handle to a secret real value.
///
/// A wire never exposes a plaintext; the only way to act on it is to issue
/// further gates through a [`crate::CircuitBuilder`], and the only way to
/// learn its value is an explicit [`Gate::Reveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wire(pub(crate) u32);

impl Wire {
    /// Position of the gate that produced this wire.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One operation of the provider capability set.
///
/// Gates fall in two classes. Local gates ([`Gate::Const`], [`Gate::Add`],
/// [`Gate::Sub`], [`Gate::Scale`], [`Gate::Offset`]) are computed by every
/// party on its own shares and cost nothing. Interactive gates require one
/// network round under the sharing scheme; independent interactive gates are
/// batched into the same round.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Joint input: the owning party slot contributes plaintext, every other
    /// party contributes a zero placeholder.
    Input {
        /// Zero-based party slot that owns the plaintext.
        party: usize,
    },
    /// Public constant known to every party.
    Const(f64),
    /// Secret addition. Local.
    Add(Wire, Wire),
    /// Secret subtraction. Local.
    Sub(Wire, Wire),
    /// Multiplication by a public scalar. Local.
    Scale(f64, Wire),
    /// Addition of a public scalar. Local.
    Offset(f64, Wire),
    /// Secret-by-secret multiplication.
    Mul(Wire, Wire),
    /// Inner product of two equal-length secret vectors.
    InnerProduct(Vec<Wire>, Vec<Wire>),
    /// Square root of a secret value.
    Sqrt(Wire),
    /// Reciprocal of a secret value.
    Recip(Wire),
    /// Natural exponential of a secret value.
    Exp(Wire),
    /// Jointly sampled uniform draw in `[0, 1)`. No single party can
    /// predict or bias the result.
    Rand,
    /// Open a secret value to every party.
    Reveal(Wire),
}

impl Gate {
    /// Whether completing this gate requires a network round.
    pub fn is_interactive(&self) -> bool {
        !matches!(
            self,
            Gate::Const(_) | Gate::Add(..) | Gate::Sub(..) | Gate::Scale(..) | Gate::Offset(..)
        )
    }
}

/// A finished joint computation: gates in issue order plus their round
/// schedule and the reveal order.
///
/// Two parties that build the same computation from the same public metadata
/// obtain equal circuits; comparing them is how the lock-step invariant is
/// verified in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub(crate) gates: Vec<Gate>,
    pub(crate) levels: Vec<u32>,
    pub(crate) outputs: Vec<u32>,
}

impl Circuit {
    /// The gates in issue order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Round level of the gate feeding `wire`. Level 0 means the value is
    /// available before any interaction.
    pub fn level(&self, wire: Wire) -> usize {
        self.levels[wire.index()] as usize
    }

    /// Number of network rounds needed to evaluate the circuit.
    pub fn rounds(&self) -> usize {
        self.levels.iter().copied().max().unwrap_or(0) as usize
    }

    /// Number of revealed outputs.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// The sequentially linked list of parallel batches: `schedule()[k]`
    /// holds the interactive gates resolved in round `k + 1`.
    pub fn schedule(&self) -> Vec<Vec<usize>> {
        let mut batches = vec![Vec::new(); self.rounds()];
        for (index, gate) in self.gates.iter().enumerate() {
            if gate.is_interactive() {
                let level = self.levels[index] as usize;
                batches[level - 1].push(index);
            }
        }
        batches
    }
}
