//! # 音频文件属性
//!
//! WAV 文件解析 RIFF 块获得声道数、采样率、位深和时长；
//! 其他音频格式只报告格式名。
//!
//! ## WAV 格式说明
//! ```text
//! "RIFF" size "WAVE"
//! "fmt " size format(2) channels(2) sample_rate(4) byte_rate(4) align(2) bits(2)
//! "data" size ...
//! ```
//!
//! ## 依赖关系
//! - 被 `codecs/mod.rs` 注册为 audio 属性提取器
//! - 被 `codecs/media.rs` 用于文件头校验

use super::{read_bytes, PropertyExtractor};
use crate::error::Result;
use crate::models::{Category, Properties};

use std::path::Path;

pub fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

/// WAV 文件头信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub byte_rate: u32,
    pub data_len: u32,
}

impl WavInfo {
    /// 时长（秒）
    pub fn duration_secs(&self) -> f64 {
        if self.byte_rate == 0 {
            0.0
        } else {
            self.data_len as f64 / self.byte_rate as f64
        }
    }
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

fn le_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// 遍历 RIFF 块解析 WAV 文件头
pub fn parse_wav(bytes: &[u8]) -> Option<WavInfo> {
    if !is_wav(bytes) {
        return None;
    }

    let mut fmt = None;
    let mut data_len = None;
    let mut i = 12;

    while i + 8 <= bytes.len() {
        let id = &bytes[i..i + 4];
        let size = le_u32(bytes, i + 4)? as usize;
        let body = i + 8;

        match id {
            b"fmt " => {
                fmt = Some((
                    le_u16(bytes, body + 2)?,
                    le_u32(bytes, body + 4)?,
                    le_u32(bytes, body + 8)?,
                    le_u16(bytes, body + 14)?,
                ));
            }
            b"data" => data_len = Some(size as u32),
            _ => {}
        }

        if fmt.is_some() && data_len.is_some() {
            break;
        }
        // 块按偶数字节对齐
        i = body + size + (size & 1);
    }

    let (channels, sample_rate, byte_rate, bits_per_sample) = fmt?;
    Some(WavInfo {
        channels,
        sample_rate,
        bits_per_sample,
        byte_rate,
        data_len: data_len.unwrap_or(0),
    })
}

/// 音频属性提取器
pub struct AudioProperties;

impl PropertyExtractor for AudioProperties {
    fn extract(&self, path: &Path, category: &Category, properties: &mut Properties) -> Result<()> {
        properties.insert("format", category.secondary.as_str());

        if category.secondary != "x-wav" {
            return Ok(());
        }

        let bytes = read_bytes(path)?;
        if let Some(info) = parse_wav(&bytes) {
            properties.insert("channels", info.channels);
            properties.insert("sample_rate", info.sample_rate);
            properties.insert("bits_per_sample", info.bits_per_sample);
            properties.insert("duration_secs", info.duration_secs());
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 生成 PCM WAV 文件
    pub(crate) fn tiny_wav(channels: u16, sample_rate: u32, samples: u32) -> Vec<u8> {
        let bits: u16 = 16;
        let align = channels * bits / 8;
        let byte_rate = sample_rate * align as u32;
        let data_len = samples * align as u32;

        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&align.to_le_bytes());
        bytes.extend_from_slice(&bits.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.extend(std::iter::repeat(0u8).take(data_len as usize));
        bytes
    }

    #[test]
    fn test_parse_wav() {
        let info = parse_wav(&tiny_wav(2, 8000, 4000)).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.bits_per_sample, 16);
        assert!((info.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let wav = tiny_wav(1, 1000, 10);
        // 在 fmt 之前插入一个奇数长度的 LIST 块
        let mut patched = wav[..12].to_vec();
        patched.extend_from_slice(b"LIST");
        patched.extend_from_slice(&3u32.to_le_bytes());
        patched.extend_from_slice(&[1, 2, 3, 0]);
        patched.extend_from_slice(&wav[12..]);

        let info = parse_wav(&patched).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.data_len, 20);
    }

    #[test]
    fn test_not_wav() {
        assert!(parse_wav(b"ID3\x03\x00").is_none());
    }

    #[test]
    fn test_extract_mp3_reports_format_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let mut props = Properties::new();
        AudioProperties
            .extract(&path, &Category::new("audio", "mpeg"), &mut props)
            .unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("format").unwrap().to_string(), "mpeg");
    }
}
