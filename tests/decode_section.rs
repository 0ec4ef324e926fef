use assert_matches::assert_matches;
use hex_literal::hex;
use mpeg2ts_psi::descriptor::{encode_descriptors, parse_descriptors, CoreDescriptors, Descriptor};
use mpeg2ts_psi::psi::{TableId, TablePayload};
use mpeg2ts_psi::smptera::FormatIdentifier;
use mpeg2ts_psi::{decode_section, Pid, SectionError, SizeError, StreamType};

static PAT: [u8; 16] = hex!("00b00d0001c100000002e020a0aadcc8");

static PMT: [u8; 64] = hex!(
    "02b03d0002c10000e021f00605044355454902e021f00081e024f00086e02df000c0e6e8f009050445545631a20100c0e6eaf008050445545631a10070fcbf1f"
);

static USER_PRIVATE: [u8; 117] = hex!(
    "e000720000000300000800ffffff000100e05e01010000000000000064105200506c69643a2f2f69622e7476776f726b732e636f6d2f4361626c656c6162735f4e6174696f6e616c5f6574765f73747265616d5f636f6e6669672f6d61696e6170702f312e302f6d61696e5f70722e70725a039926"
);

#[test]
fn program_association() {
    let section = decode_section(&PAT).unwrap();
    assert_eq!(section.table(), TableId::ProgramAssociation);
    assert_eq!(section.section_length, 13);
    let syntax = section.syntax_section.as_ref().unwrap();
    assert_eq!(syntax.table_id_extension, 1);
    assert_eq!(syntax.version_number, 0);
    assert!(syntax.current_next_indicator);
    assert_eq!(syntax.section_number, 0);
    assert_eq!(syntax.last_section_number, 0);
    assert_eq!(syntax.crc32, 0xa0aadcc8);
    assert_matches!(section.payload, TablePayload::ProgramAssociation(pat) => {
        assert_eq!(pat.transport_stream_id, 1);
        assert_eq!(pat.programs.len(), 1);
        assert_eq!(pat.programs[0].program_number, 2);
        assert_eq!(pat.programs[0].pid, Pid::new(0x20));
    });
}

#[test]
fn program_association_low_pid() {
    let data = hex!("00b00d0001c100000002e002310b5146");
    let section = decode_section(&data).unwrap();
    assert_matches!(section.payload, TablePayload::ProgramAssociation(pat) => {
        assert_eq!(pat.pmt_pid(2), Some(Pid::new(2)));
        assert_eq!(pat.network_pid(), None);
    });
}

#[test]
fn program_map() {
    let section = decode_section(&PMT).unwrap();
    assert_eq!(section.table(), TableId::ProgramMap);
    assert_eq!(section.private_data(), None);
    let pmt = match section.payload {
        TablePayload::ProgramMap(pmt) => pmt,
        other => panic!("unexpected payload {:?}", other),
    };
    assert_eq!(pmt.program_number, 2);
    assert_eq!(pmt.pcr_pid, Some(Pid::new(33)));
    assert_eq!(pmt.program_info_length, 6);
    assert_eq!(pmt.descriptors, vec![Descriptor::new(5, b"CUEI")]);
    assert_matches!(pmt.descriptors[0].core(), Ok(CoreDescriptors::Registration(reg)) => {
        assert_eq!(reg.format_identifier(), FormatIdentifier::from(&b"CUEI"[..]));
    });

    let summary: Vec<(StreamType, u16, usize)> = pmt
        .streams
        .iter()
        .map(|s| (s.stream_type, u16::from(s.elementary_pid), s.descriptors.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (StreamType::H262, 33, 0),
            (StreamType::AtscDolbyDigitalAudio, 36, 0),
            (StreamType::Private(134), 45, 0),
            (StreamType::Private(192), 1768, 2),
            (StreamType::Private(192), 1770, 2),
        ]
    );
    assert_eq!(
        pmt.streams[3].descriptors,
        vec![Descriptor::new(5, b"ETV1"), Descriptor::new(162, &[0])]
    );
    assert_eq!(
        pmt.streams[4].descriptors,
        vec![Descriptor::new(5, b"ETV1"), Descriptor::new(161, &[])]
    );
}

#[test]
fn program_map_without_pcr() {
    let mut data = PMT;
    data[8] = 0xff;
    data[9] = 0xff;
    data[60..].copy_from_slice(&hex!("74c5e02a"));
    let section = decode_section(&data).unwrap();
    assert_matches!(section.payload, TablePayload::ProgramMap(pmt) => {
        assert_eq!(pmt.pcr_pid, None);
        assert_eq!(pmt.streams.len(), 5);
    });
}

#[test]
fn user_private() {
    let section = decode_section(&USER_PRIVATE).unwrap();
    assert_eq!(section.table(), TableId::UserPrivate(0xe0));
    assert_eq!(section.syntax_section, None);
    assert!(!section.private_indicator);
    assert_eq!(section.section_length, 114);
    assert_eq!(section.private_data(), Some(&USER_PRIVATE[3..]));
    assert_eq!(section.payload, TablePayload::Private(&USER_PRIVATE[3..]));
}

#[test]
fn bad_crc() {
    let mut data = PAT;
    data[4] = 5;
    assert_matches!(
        decode_section(&data),
        Err(SectionError::InvalidCrc { expected: 0xa0aadcc8, .. })
    );
}

#[test]
fn buffer_too_short() {
    let data = [0, 176, 13, 0, 1, 193, 0, 0, 0, 2, 224, 32, 160, 170, 220];
    assert_matches!(
        decode_section(&data),
        Err(SectionError::BadSize(SizeError::BufferTooShort {
            section_length: 13,
            actual: 15
        }))
    );
}

#[test]
fn buffer_too_long() {
    let data = [0, 176, 13, 0, 1, 193, 0, 0, 0, 2, 224, 32, 160, 170, 220, 0, 0];
    let err = decode_section(&data).unwrap_err();
    assert_matches!(
        err,
        SectionError::BadSize(SizeError::BufferTooLong {
            section_length: 13,
            actual: 17
        })
    );
    assert!(err.to_string().contains("longer than declared section length"));
}

#[test]
fn syntax_header_too_short() {
    let err = decode_section(&[0, 176, 0]).unwrap_err();
    assert_matches!(err, SectionError::BadSize(SizeError::SyntaxHeaderIncomplete { .. }));
    assert!(err.to_string().contains("extended syntax header is incomplete"));
}

#[test]
fn descriptors_reencode_to_original_bytes() {
    // the descriptor loop of the last PMT stream entry
    let loop_bytes = &PMT[52..60];
    let descs = parse_descriptors(loop_bytes).unwrap();
    assert_eq!(encode_descriptors(&descs).unwrap(), loop_bytes);

    let section = decode_section(&PMT).unwrap();
    if let TablePayload::ProgramMap(pmt) = section.payload {
        for stream in &pmt.streams {
            let encoded = encode_descriptors(&stream.descriptors).unwrap();
            assert_eq!(parse_descriptors(&encoded).unwrap(), stream.descriptors);
        }
    }
}
