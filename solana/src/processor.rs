// Copyright (C) 2024 quip.network
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: AGPL-3.0-or-later
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    program::invoke_signed,
    sysvar::{rent::Rent, Sysvar},
};
use wots::{constants, CompressedPublicKey, Signature, WOTSPlus, WotsError};
use borsh::{BorshSerialize, BorshDeserialize};
use solana_program::keccak::hash as keccak256_hash;
use solana_program::program::set_return_data;
use solana_program::system_instruction::create_account;
use solana_program::account_info::next_account_info;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    keccak256_hash(data).to_bytes()
}

/// Borsh form of a compressed public key for the default parameter set:
/// key index, public seed, endpoint digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPublicKeyWrapper(CompressedPublicKey);

impl From<CompressedPublicKey> for CompressedPublicKeyWrapper {
    fn from(pk: CompressedPublicKey) -> Self {
        CompressedPublicKeyWrapper(pk)
    }
}

impl From<CompressedPublicKeyWrapper> for CompressedPublicKey {
    fn from(wrapper: CompressedPublicKeyWrapper) -> Self {
        wrapper.0
    }
}

impl borsh::ser::BorshSerialize for CompressedPublicKeyWrapper {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let invalid = || std::io::Error::new(std::io::ErrorKind::InvalidData, "public key is not 32-byte WOTS+");
        let public_seed: [u8; constants::HASH_LEN] =
            self.0.public_seed.as_slice().try_into().map_err(|_| invalid())?;
        let digest: [u8; constants::HASH_LEN] = self.0.digest.as_slice().try_into().map_err(|_| invalid())?;

        borsh::BorshSerialize::serialize(&self.0.key_index, writer)?;
        borsh::BorshSerialize::serialize(&public_seed, writer)?;
        borsh::BorshSerialize::serialize(&digest, writer)?;
        Ok(())
    }
}

impl borsh::de::BorshDeserialize for CompressedPublicKeyWrapper {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let key_index: u64 = borsh::BorshDeserialize::deserialize_reader(reader)?;
        let public_seed: [u8; constants::HASH_LEN] = borsh::BorshDeserialize::deserialize_reader(reader)?;
        let digest: [u8; constants::HASH_LEN] = borsh::BorshDeserialize::deserialize_reader(reader)?;
        Ok(CompressedPublicKeyWrapper(CompressedPublicKey {
            key_index,
            public_seed: public_seed.to_vec(),
            digest: digest.to_vec(),
        }))
    }
}

#[derive(BorshSerialize, BorshDeserialize)]
pub struct SignatureAccount {
    pub is_initialized: bool,
    pub signature: Vec<[u8; constants::HASH_LEN]>,
}

#[derive(Debug, BorshSerialize, BorshDeserialize)]
pub enum WOTSPlusInstruction {
    GenerateKeyPair {
        master_seed: [u8; 32],
    },
    Sign {
        master_seed: [u8; 32],
        digest: Vec<u8>,
    },
    Verify {
        public_key: CompressedPublicKeyWrapper,
        digest: Vec<u8>,
        signature: Vec<[u8; constants::HASH_LEN]>,
    },
}

/// Split a signature into the fixed-size chunks stored on chain.
pub fn signature_chunks(signature: &Signature) -> Result<Vec<[u8; constants::HASH_LEN]>, ProgramError> {
    signature
        .elements()
        .iter()
        .map(|element| {
            element
                .as_slice()
                .try_into()
                .map_err(|_| ProgramError::InvalidAccountData)
        })
        .collect()
}

fn to_program_error(err: WotsError) -> ProgramError {
    msg!("WOTS+ error: {}", err);
    match err {
        WotsError::InvalidParameter { .. } => ProgramError::InvalidInstructionData,
        WotsError::KeyReused => ProgramError::InvalidArgument,
        WotsError::ChainOverrun { .. } | WotsError::VerificationFailed => ProgramError::InvalidArgument,
    }
}

// Split the instruction processing into smaller functions to reduce stack usage
fn process_generate_keypair(
    wots: &WOTSPlus<wots::HashFn>,
    master_seed: [u8; 32],
) -> ProgramResult {
    let (_private_key, public_key) = wots.generate_key_pair(&master_seed).map_err(to_program_error)?;
    let compressed = wots.compress(&public_key).map_err(to_program_error)?;

    let mut result_data = Vec::new();
    CompressedPublicKeyWrapper::from(compressed)
        .serialize(&mut result_data)
        .map_err(|_| ProgramError::InvalidInstructionData)?;

    set_return_data(&result_data);
    Ok(())
}

fn process_sign(
    wots: &WOTSPlus<wots::HashFn>,
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    master_seed: [u8; 32],
    digest: &[u8],
) -> ProgramResult {
    if digest.len() != constants::MESSAGE_LEN {
        return Err(ProgramError::InvalidInstructionData);
    }

    // Get account info
    let accounts_iter = &mut accounts.iter();
    let signer = next_account_info(accounts_iter)?;
    let signature_account = next_account_info(accounts_iter)?;
    let system_program = next_account_info(accounts_iter)?;

    // Create PDA for signature storage
    let (pda, bump_seed) = Pubkey::find_program_address(
        &[
            b"signature",
            signer.key.as_ref(),
            digest,
        ],
        program_id
    );

    // Verify the PDA matches our signature account
    if pda != *signature_account.key {
        return Err(ProgramError::InvalidArgument);
    }

    let account_size = 1 + // is_initialized
        4 + // Vec length prefix
        constants::SIGNATURE_SIZE;

    let rent = Rent::get()?;
    let rent_lamports = rent.minimum_balance(account_size);

    // Create the account if it doesn't exist
    if signature_account.data_is_empty() {
        let create_account_ix = create_account(
            signer.key,
            &pda,
            rent_lamports,
            account_size as u64,
            program_id,
        );

        invoke_signed(
            &create_account_ix,
            &[
                signer.clone(),
                signature_account.clone(),
                system_program.clone(),
            ],
            &[&[
                b"signature",
                signer.key.as_ref(),
                digest,
                &[bump_seed],
            ]],
        )?;
    }

    // Signing needs only the chain seeds, not the public key
    let private_key = wots.private_key(&master_seed).map_err(to_program_error)?;
    let signature = wots.sign(private_key, digest).map_err(to_program_error)?;

    let signature_account_data = SignatureAccount {
        is_initialized: true,
        signature: signature_chunks(&signature)?,
    };

    signature_account_data.serialize(&mut &mut signature_account.try_borrow_mut_data()?[..])?;

    Ok(())
}

fn process_verify(
    wots: &WOTSPlus<wots::HashFn>,
    public_key: CompressedPublicKeyWrapper,
    digest: &[u8],
    signature: Vec<[u8; constants::HASH_LEN]>,
) -> ProgramResult {
    if digest.len() != constants::MESSAGE_LEN {
        return Err(ProgramError::InvalidInstructionData);
    }

    let public_key = CompressedPublicKey::from(public_key);
    let signature = Signature::from_elements(signature.iter().map(|chunk| chunk.to_vec()).collect());
    match wots.verify_compressed(&public_key, digest, &signature) {
        Ok(()) => set_return_data(&[1]),
        Err(WotsError::VerificationFailed) => set_return_data(&[0]),
        Err(err) => return Err(to_program_error(err)),
    }
    Ok(())
}

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if instruction_data.is_empty() {
        return Err(ProgramError::InvalidInstructionData);
    }

    // Only verify signatures for accounts that are marked as signers
    for account_info in accounts.iter() {
        if account_info.is_signer && account_info.signer_key().is_none() {
            return Err(ProgramError::MissingRequiredSignature);
        }
    }

    let wots = WOTSPlus::with_hash_fn(keccak256);

    let instruction = match WOTSPlusInstruction::try_from_slice(instruction_data) {
        Ok(inst) => inst,
        Err(e) => {
            msg!("Failed to deserialize instruction: {:?}", e);
            return Err(ProgramError::InvalidInstructionData);
        }
    };

    match instruction {
        WOTSPlusInstruction::GenerateKeyPair { master_seed } => {
            process_generate_keypair(&wots, master_seed)
        },
        WOTSPlusInstruction::Sign { master_seed, digest } => {
            process_sign(&wots, program_id, accounts, master_seed, &digest)
        },
        WOTSPlusInstruction::Verify { public_key, digest, signature } => {
            process_verify(&wots, public_key, &digest, signature)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_key_wrapper_borsh() {
        let wrapper = CompressedPublicKeyWrapper::from(CompressedPublicKey {
            key_index: 3,
            public_seed: vec![1u8; 32],
            digest: vec![2u8; 32],
        });
        let bytes = borsh::to_vec(&wrapper).unwrap();
        assert_eq!(bytes.len(), constants::COMPRESSED_PUBLIC_KEY_SIZE);
        // borsh integers are little-endian
        assert_eq!(&bytes[..8], &3u64.to_le_bytes());
        assert_eq!(CompressedPublicKeyWrapper::try_from_slice(&bytes).unwrap(), wrapper);
    }

    #[test]
    fn test_public_key_wrapper_rejects_wrong_width() {
        let wrapper = CompressedPublicKeyWrapper::from(CompressedPublicKey {
            key_index: 0,
            public_seed: vec![1u8; 16],
            digest: vec![2u8; 16],
        });
        assert!(borsh::to_vec(&wrapper).is_err());
    }

    #[test]
    fn test_signature_chunks() {
        let wots = WOTSPlus::with_hash_fn(keccak256);
        let (private_key, _) = wots.generate_key_pair(&[1u8; 32]).unwrap();
        let signature = wots.sign(private_key, &[2u8; 32]).unwrap();
        let chunks = signature_chunks(&signature).unwrap();
        assert_eq!(chunks.len(), constants::NUM_SIGNATURE_CHUNKS);
        assert_eq!(chunks[0].to_vec(), signature.elements()[0]);
    }
}
