// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `appxsig` integration tests.
//!
//! The integration tests exercise the validation core against a scriptable
//! fake PKI capability: certificates, signer identities, and chain
//! classifications are all declared up front, so each test states exactly
//! the PKI world it runs in. Synthetic readers cover the envelope-level
//! stream behaviors.

#![allow(dead_code)]

use std::io::{Read, Seek, SeekFrom};

use appxsig::P7X_FILE_ID;
use appxsig_abstractions::{
    DecodedContent, Lookup, PkiCapability, Result, SignatureError, SignerId, TrustPolicy,
};

/// Serialize a P7X envelope around `payload`.
pub fn p7x_bytes(payload: &[u8]) -> Vec<u8> {
    let mut bytes = P7X_FILE_ID.to_le_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

/// A seekable stream over a well-formed P7X envelope.
pub fn p7x_stream(payload: &[u8]) -> std::io::Cursor<Vec<u8>> {
    std::io::Cursor::new(p7x_bytes(payload))
}

/// A `Read + Seek` implementation that panics on any use.
///
/// Used to prove that `SKIP_SIGNATURE` never touches the stream.
pub struct PanicStream;

impl Read for PanicStream {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        panic!("stream was read");
    }
}

impl Seek for PanicStream {
    fn seek(&mut self, _pos: SeekFrom) -> std::io::Result<u64> {
        panic!("stream was seeked");
    }
}

/// A stream that reports a larger length than it can deliver.
///
/// Seeking works against `reported_len`, but reads only produce `data`.
/// Used to exercise the truncated-read branch of envelope parsing.
pub struct ShortStream {
    pub reported_len: u64,
    pub data: Vec<u8>,
    pub pos: u64,
}

impl Read for ShortStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let start = (self.pos as usize).min(self.data.len());
        let count = (self.data.len() - start).min(buf.len());
        buf[..count].copy_from_slice(&self.data[start..start + count]);
        self.pos += count as u64;
        Ok(count)
    }
}

impl Seek for ShortStream {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.pos = match pos {
            SeekFrom::Start(n) => n,
            SeekFrom::End(off) => (self.reported_len as i64 + off) as u64,
            SeekFrom::Current(off) => (self.pos as i64 + off) as u64,
        };
        Ok(self.pos)
    }
}

/// Scripted outcome for a capability lookup.
#[derive(Debug, Clone, Default)]
pub enum FakeLookup<T> {
    Found(T),
    #[default]
    NotFound,
    /// The query hard-fails (not a benign not-found).
    Fail,
}

impl<T: Clone> FakeLookup<T> {
    fn resolve(&self, what: &str) -> Result<Lookup<T>> {
        match self {
            FakeLookup::Found(value) => Ok(Lookup::Found(value.clone())),
            FakeLookup::NotFound => Ok(Lookup::NotFound),
            FakeLookup::Fail => Err(SignatureError::invalid(format!("{what} query failed"))),
        }
    }
}

/// A scripted certificate.
#[derive(Debug, Clone, Default)]
pub struct FakeCert {
    pub subject: Vec<u8>,
    pub issuer: Vec<u8>,
    pub serial: Vec<u8>,
    pub self_signature_valid: bool,
    pub basic_constraints: FakeLookup<bool>,
    pub eku_extension: FakeLookup<Vec<String>>,
    pub eku_property: FakeLookup<Vec<String>>,
}

impl FakeCert {
    pub fn new(subject: &str, issuer: &str, serial: &[u8]) -> Self {
        Self {
            subject: subject.as_bytes().to_vec(),
            issuer: issuer.as_bytes().to_vec(),
            serial: serial.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_ca(mut self, ca: bool) -> Self {
        self.basic_constraints = FakeLookup::Found(ca);
        self
    }

    pub fn with_valid_self_signature(mut self) -> Self {
        self.self_signature_valid = true;
        self
    }

    pub fn with_eku_extension(mut self, oids: &[&str]) -> Self {
        self.eku_extension = FakeLookup::Found(oids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_eku_property(mut self, oids: &[&str]) -> Self {
        self.eku_property = FakeLookup::Found(oids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn signer_id(&self) -> SignerId {
        SignerId {
            issuer: self.issuer.clone(),
            serial: self.serial.clone(),
        }
    }
}

/// A trust root: self-signed CA.
pub fn root_cert(name: &str) -> FakeCert {
    FakeCert::new(name, name, b"01")
        .with_ca(true)
        .with_valid_self_signature()
}

/// An intermediate CA issued by `issuer`.
pub fn ca_cert(name: &str, issuer: &str) -> FakeCert {
    FakeCert::new(name, issuer, b"02").with_ca(true)
}

/// An end-entity certificate issued by `issuer`.
pub fn leaf_cert(name: &str, issuer: &str, serial: &[u8]) -> FakeCert {
    FakeCert::new(name, issuer, serial)
}

/// A scripted signed message: store contents, signer identity, and the
/// trust classifications its signer's chain should produce.
#[derive(Debug, Clone, Default)]
pub struct FakeMessage {
    pub certs: Vec<FakeCert>,
    pub signer: SignerId,
    pub store_root_trusted: bool,
    pub authenticode_trusted: bool,
    pub chain_build_fails: bool,
}

impl FakeMessage {
    pub fn with_certs(certs: Vec<FakeCert>) -> Self {
        Self {
            certs,
            ..Self::default()
        }
    }

    pub fn signed_by(mut self, cert: &FakeCert) -> Self {
        self.signer = cert.signer_id();
        self
    }

    pub fn store_root_trusted(mut self, trusted: bool) -> Self {
        self.store_root_trusted = trusted;
        self
    }

    pub fn authenticode_trusted(mut self, trusted: bool) -> Self {
        self.authenticode_trusted = trusted;
        self
    }
}

/// What the fake capability decodes any payload into.
#[derive(Debug, Clone)]
pub enum FakeContent {
    Message(FakeMessage),
    Certificate(FakeCert),
    DecodeFails,
}

/// Chain handle produced by the fake capability.
#[derive(Debug, Clone)]
pub struct FakeChain {
    store_root: bool,
    authenticode: bool,
}

/// A scriptable `PkiCapability` for orchestrator-level tests.
pub struct FakePki {
    pub content: FakeContent,
}

impl FakePki {
    pub fn message(message: FakeMessage) -> Self {
        Self {
            content: FakeContent::Message(message),
        }
    }

    pub fn certificate(cert: FakeCert) -> Self {
        Self {
            content: FakeContent::Certificate(cert),
        }
    }

    pub fn decode_fails() -> Self {
        Self {
            content: FakeContent::DecodeFails,
        }
    }
}

impl PkiCapability for FakePki {
    type Message = FakeMessage;
    type Certificate = FakeCert;
    type Chain = FakeChain;

    fn decode(&self, _blob: &[u8]) -> Result<DecodedContent<FakeMessage, FakeCert>> {
        match &self.content {
            FakeContent::Message(message) => Ok(DecodedContent::SignedMessage(message.clone())),
            FakeContent::Certificate(cert) => Ok(DecodedContent::Certificate(cert.clone())),
            FakeContent::DecodeFails => Err(SignatureError::invalid("decode failed")),
        }
    }

    fn store_certificates(&self, message: &FakeMessage) -> Result<Vec<FakeCert>> {
        Ok(message.certs.clone())
    }

    fn signer_id(&self, message: &FakeMessage) -> Result<SignerId> {
        Ok(message.signer.clone())
    }

    fn issuer_name<'a>(&self, certificate: &'a FakeCert) -> &'a [u8] {
        &certificate.issuer
    }

    fn subject_name<'a>(&self, certificate: &'a FakeCert) -> &'a [u8] {
        &certificate.subject
    }

    fn serial_number<'a>(&self, certificate: &'a FakeCert) -> &'a [u8] {
        &certificate.serial
    }

    fn names_equal(&self, left: &[u8], right: &[u8]) -> bool {
        left == right
    }

    fn basic_constraints_ca(&self, certificate: &FakeCert) -> Result<Lookup<bool>> {
        certificate.basic_constraints.resolve("basic-constraints")
    }

    fn eku_extension_oids(&self, certificate: &FakeCert) -> Result<Lookup<Vec<String>>> {
        certificate.eku_extension.resolve("EKU extension")
    }

    fn eku_property_oids(&self, certificate: &FakeCert) -> Result<Lookup<Vec<String>>> {
        certificate.eku_property.resolve("EKU property")
    }

    fn verifies_against(&self, subject: &FakeCert, issuer: &FakeCert) -> Result<bool> {
        if subject.subject == issuer.subject && subject.serial == issuer.serial {
            return Ok(subject.self_signature_valid);
        }
        Ok(false)
    }

    fn find_certificate(
        &self,
        message: &FakeMessage,
        signer: &SignerId,
    ) -> Result<Lookup<FakeCert>> {
        let found = message
            .certs
            .iter()
            .find(|cert| cert.issuer == signer.issuer && cert.serial == signer.serial);
        Ok(match found {
            Some(cert) => Lookup::Found(cert.clone()),
            None => Lookup::NotFound,
        })
    }

    fn build_chain(&self, message: &FakeMessage, _certificate: &FakeCert) -> Result<FakeChain> {
        if message.chain_build_fails {
            return Err(SignatureError::invalid("chain construction failed"));
        }
        Ok(FakeChain {
            store_root: message.store_root_trusted,
            authenticode: message.authenticode_trusted,
        })
    }

    fn chain_matches_policy(&self, chain: &FakeChain, policy: TrustPolicy) -> Result<bool> {
        Ok(match policy {
            TrustPolicy::StoreRoot => chain.store_root,
            TrustPolicy::Authenticode => chain.authenticode,
        })
    }
}
