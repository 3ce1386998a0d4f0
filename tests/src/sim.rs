//! Simulated SIM
//!
//! Plays the device side of AKA: verifies AUTN, enforces SQN freshness per
//! IND slot (3GPP TS 33.102 Annex C.2.2) and answers a stale challenge with
//! AUTS, the way a USIM would.

use nextgauc_auc::sqn;
use nextgauc_crypto::milenage::{AUTS_SIZE, SQN_SIZE};
use nextgauc_crypto::{comp128v1, comp128v2, comp128v3, xor, Milenage};
use nextgauc_common::AuthAlgo;
use tracing::{debug, info, warn};

/// Algorithm running on the SIM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAlgo {
    /// MILENAGE with the given OPc
    Milenage([u8; 16]),
    /// XOR test algorithm
    Xor,
    /// COMP128 of the given version (GSM only)
    Comp128(AuthAlgo),
}

/// Successful UMTS authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimResponse {
    /// Response to send to the network
    pub res: Vec<u8>,
    /// Cipher key
    pub ck: [u8; 16],
    /// Integrity key
    pub ik: [u8; 16],
    /// SQN carried by the accepted AUTN
    pub sqn: u64,
}

/// Reasons a SIM rejects a challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimReject {
    /// MAC-A did not verify
    MacFailure,
    /// AUTN was authentic but its SQN was not fresh
    SyncFailure {
        /// AUTS carrying the SIM's highest accepted SQN
        auts: [u8; AUTS_SIZE],
    },
    /// The algorithm has no UMTS mode
    NotUmts,
}

/// Device-side SQN state and keys
#[derive(Debug, Clone)]
pub struct TestSim {
    k: [u8; 16],
    algo: SimAlgo,
    ind_bitlen: u32,
    /// Highest SEQ accepted per IND slot
    seq_ms: Vec<u64>,
    /// Highest SQN accepted in any slot
    sqn_ms: u64,
}

impl TestSim {
    /// A fresh SIM that has never accepted a challenge
    pub fn new(k: [u8; 16], algo: SimAlgo, ind_bitlen: u32) -> Self {
        Self {
            k,
            algo,
            ind_bitlen,
            seq_ms: vec![0; 1 << ind_bitlen],
            sqn_ms: 0,
        }
    }

    /// Pretend the SIM has already accepted `sqn`
    pub fn with_accepted_sqn(mut self, sqn_value: u64) -> Self {
        self.accept(sqn_value);
        self
    }

    /// Highest SQN accepted so far
    pub fn sqn_ms(&self) -> u64 {
        self.sqn_ms
    }

    fn accept(&mut self, sqn_value: u64) {
        let slot = sqn::ind(sqn_value, self.ind_bitlen) as usize;
        self.seq_ms[slot] = sqn::seq(sqn_value, self.ind_bitlen);
        self.sqn_ms = self.sqn_ms.max(sqn_value);
    }

    /// Run UMTS authentication for `rand`/`autn`.
    pub fn authenticate(
        &mut self,
        rand: &[u8; 16],
        autn: &[u8; 16],
    ) -> Result<SimResponse, SimReject> {
        let mut concealed = [0u8; SQN_SIZE];
        concealed.copy_from_slice(&autn[..6]);
        let amf = [autn[6], autn[7]];

        // Recover SQN = (SQN⊕AK) ⊕ AK and recompute the whole AUTN
        let (sqn_bytes, expected_autn, response) = match self.algo {
            SimAlgo::Milenage(opc) => {
                let m = Milenage::new(&self.k, &opc);
                let sqn_bytes = xor_6(&concealed, &m.f5(rand));
                let v = m.generate(rand, &sqn_bytes, &amf);
                (sqn_bytes, v.autn, (v.res.to_vec(), v.ck, v.ik))
            }
            SimAlgo::Xor => {
                let x = xor::xdout(&self.k, rand);
                let mut ak = [0u8; SQN_SIZE];
                ak.copy_from_slice(&x[3..9]);
                let sqn_bytes = xor_6(&concealed, &ak);
                let v = xor::generate(&self.k, rand, &sqn_bytes, &amf);
                (sqn_bytes, v.autn, (v.res.to_vec(), v.ck, v.ik))
            }
            SimAlgo::Comp128(_) => return Err(SimReject::NotUmts),
        };

        if &expected_autn != autn {
            warn!("SIM: MAC verification failed");
            return Err(SimReject::MacFailure);
        }

        let sqn_value = sqn::from_bytes(&sqn_bytes);
        let slot = sqn::ind(sqn_value, self.ind_bitlen) as usize;
        if sqn::seq(sqn_value, self.ind_bitlen) <= self.seq_ms[slot] {
            info!(
                "SIM: SQN {} not fresh in slot {} (SQN.MS {})",
                sqn_value, slot, self.sqn_ms
            );
            return Err(match self.auts(rand) {
                Some(auts) => SimReject::SyncFailure { auts },
                None => SimReject::NotUmts,
            });
        }

        self.accept(sqn_value);
        debug!("SIM: accepted SQN {}", sqn_value);
        let (res, ck, ik) = response;
        Ok(SimResponse {
            res,
            ck,
            ik,
            sqn: sqn_value,
        })
    }

    /// AUTS for the current SQN.MS in response to challenge `rand`
    pub fn auts(&self, rand: &[u8; 16]) -> Option<[u8; AUTS_SIZE]> {
        let sqn_ms = sqn::to_bytes(self.sqn_ms);
        match self.algo {
            SimAlgo::Milenage(opc) => Some(Milenage::new(&self.k, &opc).build_auts(rand, &sqn_ms)),
            SimAlgo::Xor => Some(xor::build_auts(&self.k, rand, &sqn_ms)),
            SimAlgo::Comp128(_) => None,
        }
    }

    /// Run GSM authentication: (SRES, Kc).
    pub fn run_gsm(&self, rand: &[u8; 16]) -> ([u8; 4], [u8; 8]) {
        match self.algo {
            SimAlgo::Milenage(opc) => Milenage::new(&self.k, &opc).gsm_triplet(rand),
            SimAlgo::Xor => xor::gsm_triplet(&self.k, rand),
            SimAlgo::Comp128(AuthAlgo::Comp128v2) => comp128v2(&self.k, rand),
            SimAlgo::Comp128(AuthAlgo::Comp128v3) => comp128v3(&self.k, rand),
            SimAlgo::Comp128(_) => comp128v1(&self.k, rand),
        }
    }
}

fn xor_6(a: &[u8; SQN_SIZE], b: &[u8; SQN_SIZE]) -> [u8; SQN_SIZE] {
    let mut out = [0u8; SQN_SIZE];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
        *o = x ^ y;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::h;

    fn sim() -> TestSim {
        TestSim::new(
            h("465b5ce8b199b49faa5f0a2ee238a6bc"),
            SimAlgo::Milenage(h("cd63cb71954a9f4e48a5994e37a02baf")),
            5,
        )
    }

    #[test]
    fn test_tampered_autn_rejected() {
        let rand: [u8; 16] = h("23553cbe9637a89d218ae64dae47bf35");
        let mut sim = sim();
        let m = Milenage::new(&sim.k, &h("cd63cb71954a9f4e48a5994e37a02baf"));
        let mut autn = m.generate(&rand, &sqn::to_bytes(32), &[0x80, 0x00]).autn;
        autn[15] ^= 1;
        assert_eq!(sim.authenticate(&rand, &autn), Err(SimReject::MacFailure));
        assert_eq!(sim.sqn_ms(), 0);
    }

    #[test]
    fn test_replay_triggers_sync_failure() {
        let rand: [u8; 16] = h("23553cbe9637a89d218ae64dae47bf35");
        let mut sim = sim();
        let m = Milenage::new(&sim.k, &h("cd63cb71954a9f4e48a5994e37a02baf"));
        let autn = m.generate(&rand, &sqn::to_bytes(32), &[0x80, 0x00]).autn;

        let ok = sim.authenticate(&rand, &autn).unwrap();
        assert_eq!(ok.sqn, 32);
        assert_eq!(ok.res.len(), 8);
        assert!(matches!(
            sim.authenticate(&rand, &autn),
            Err(SimReject::SyncFailure { .. })
        ));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut sim = sim().with_accepted_sqn(64 + 1);
        assert_eq!(sim.sqn_ms(), 65);
        let rand = [7u8; 16];
        let m = Milenage::new(&sim.k, &h("cd63cb71954a9f4e48a5994e37a02baf"));
        // slot 2 has never been used, so a lower SQN is still fresh there
        let autn = m.generate(&rand, &sqn::to_bytes(32 + 2), &[0, 0]).autn;
        assert!(sim.authenticate(&rand, &autn).is_ok());
        assert_eq!(sim.sqn_ms(), 65);
    }
}
