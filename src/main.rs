use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

use binio::{
    format_byte_size, hex_dump, BinaryReader, DefaultFileSystem, HexFormat, SeekOrigin,
    StreamWriter, TextEncoding, TypedWrite,
};

#[derive(Parser)]
#[command(name = "binio")]
#[command(about = "查看二进制文件内容：十六进制转储、C 字符串扫描、区段导出")]
#[command(version = "0.1.0")]
struct Cli {
    /// 输入文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 起始偏移量
    #[arg(long, default_value_t = 0)]
    offset: u64,

    /// 查看的字节数（默认到文件末尾）
    #[arg(long)]
    length: Option<u64>,

    /// 扫描以 0 结尾的字符串
    #[arg(long)]
    strings: bool,

    /// 扫描字符串时的最小长度
    #[arg(long, default_value_t = 4)]
    min_len: usize,

    /// 以JSON格式输出摘要
    #[arg(long)]
    json: bool,

    /// 将选中的区段导出到文件
    #[arg(long)]
    extract: Option<PathBuf>,

    /// 导出时覆盖已存在的文件
    #[arg(long)]
    force: bool,

    /// 静默模式(仅输出错误)
    #[arg(long)]
    quiet: bool,

    /// 输出调试日志
    #[arg(long)]
    verbose: bool,
}

/// 文件摘要（JSON 输出）
#[derive(Debug, Serialize)]
struct FileSummary {
    path: PathBuf,
    size: u64,
    size_human: String,
    offset: u64,
    length: u64,
    head_hex: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    strings: Vec<FoundString>,
}

#[derive(Debug, Serialize)]
struct FoundString {
    offset: u64,
    text: String,
}

/// 摘要中十六进制预览的最大字节数
const HEAD_PREVIEW: u64 = 32;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(&cli);

    validate_input(&cli.input)?;

    let mut reader = BinaryReader::open(&cli.input)
        .with_context(|| format!("打开输入文件失败: {:?}", cli.input))?;
    let window = resolve_window(&cli, &reader)?;

    if let Some(target) = &cli.extract {
        return handle_extract(&cli, &mut reader, window, target);
    }

    if cli.json {
        return handle_json_summary(&cli, &mut reader, window);
    }

    handle_dump(&cli, &mut reader, window)
}

fn init_logger(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// 验证输入文件
fn validate_input(input: &Path) -> anyhow::Result<()> {
    if !input.is_file() {
        bail!("输入文件不存在: {:?}", input);
    }
    Ok(())
}

/// 计算查看区间 (起始偏移, 字节数)
fn resolve_window(cli: &Cli, reader: &BinaryReader) -> anyhow::Result<(u64, u64)> {
    if cli.offset > reader.len() {
        bail!("起始偏移 {} 超出文件大小 {}", cli.offset, reader.len());
    }

    let available = reader.len() - cli.offset;
    let length = match cli.length {
        Some(length) if length > available => {
            bail!("请求 {} 字节，但偏移 {} 之后只有 {} 字节", length, cli.offset, available)
        }
        Some(length) => length,
        None => available,
    };

    Ok((cli.offset, length))
}

/// 处理十六进制转储
fn handle_dump(cli: &Cli, reader: &mut BinaryReader, (offset, length): (u64, u64)) -> anyhow::Result<()> {
    reader.seek(offset as i64, SeekOrigin::Start)?;
    let data = reader.read_bytes(length as usize)?;

    if !cli.quiet {
        println!("文件: {:?} ({})", cli.input, format_byte_size(reader.len()));
        println!("区间: 0x{:08X} - 0x{:08X} ({} 字节)", offset, offset + length, length);
        println!();
    }
    print!("{}", hex_dump(&data, offset));

    if cli.strings {
        let found = scan_strings(reader, (offset, length), cli.min_len)?;
        if !cli.quiet {
            println!();
            println!("找到 {} 个字符串", found.len());
        }
        for item in &found {
            println!("0x{:08X}  {}", item.offset, item.text);
        }
    }

    reader.close();
    Ok(())
}

/// 处理JSON摘要输出
fn handle_json_summary(cli: &Cli, reader: &mut BinaryReader, window: (u64, u64)) -> anyhow::Result<()> {
    let (offset, length) = window;

    reader.seek(offset as i64, SeekOrigin::Start)?;
    let preview = length.min(HEAD_PREVIEW) as usize;
    let head_hex = reader.read_hex(Some(preview), HexFormat { prefix: true, uppercase: false })?;

    let strings = if cli.strings {
        scan_strings(reader, window, cli.min_len)?
    } else {
        Vec::new()
    };

    let summary = FileSummary {
        path: cli.input.clone(),
        size: reader.len(),
        size_human: format_byte_size(reader.len()),
        offset,
        length,
        head_hex,
        strings,
    };
    reader.close();

    let json_output = serde_json::to_string_pretty(&summary).context("序列化JSON失败")?;
    println!("{}", json_output);
    Ok(())
}

/// 将区段导出到文件
fn handle_extract(
    cli: &Cli,
    reader: &mut BinaryReader,
    (offset, length): (u64, u64),
    target: &Path,
) -> anyhow::Result<()> {
    let mut writer = StreamWriter::create_with(&DefaultFileSystem, target, cli.force)
        .with_context(|| format!("创建输出文件失败: {:?}（使用 --force 覆盖）", target))?;

    reader.seek(offset as i64, SeekOrigin::Start)?;

    // 分块复制，避免整个区段驻留内存
    const COPY_BLOCK: u64 = 64 * 1024;
    let mut left = length;
    while left > 0 {
        let block = left.min(COPY_BLOCK);
        let data = reader.read_bytes(block as usize)?;
        writer.write_bytes(&data)?;
        left -= block;
    }

    writer.close()?;
    reader.close();

    if !cli.quiet {
        println!("已导出 {} 到 {:?}", format_byte_size(writer.len()), target);
    }
    Ok(())
}

/// 扫描区间内以 0 结尾的可打印字符串
fn scan_strings(
    reader: &mut BinaryReader,
    (offset, length): (u64, u64),
    min_len: usize,
) -> anyhow::Result<Vec<FoundString>> {
    // 只在窗口内扫描，跨越窗口末尾的字符串在末尾截断
    reader.seek(offset as i64, SeekOrigin::Start)?;
    let window = reader.read_bytes(length as usize)?;
    let mut window = BinaryReader::from_bytes(window);
    let mut found = Vec::new();

    while window.remaining() > 0 {
        let start = offset + window.tell();
        let text = window.read_cstring(TextEncoding::Utf8)?;

        let printable = text.chars().all(|c| !c.is_control() && c != '\u{FFFD}');
        if printable && text.chars().count() >= min_len {
            found.push(FoundString { offset: start, text });
        }
    }

    Ok(found)
}
