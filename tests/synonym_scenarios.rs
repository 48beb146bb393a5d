use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use analysis_extension::analysis::synonym::{
    SynonymConfig, SynonymFormat, SynonymParser, SynonymTable,
};
use analysis_extension::analysis::token::Token;
use analysis_extension::analysis::token_filter::Filter;
use analysis_extension::analysis::token_filter::synonym::SynonymFilter;
use analysis_extension::analysis::tokenizer::Tokenizer;
use analysis_extension::analysis::tokenizer::ngram_synonym::{
    NGramSynonymConfig, NGramSynonymTokenizer,
};
use analysis_extension::error::{ExtensionError, Result};
use analysis_extension::resource::{ReloadableResource, ResourceParser};

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn simple(content: &str, expand: bool) -> Result<SynonymTable> {
    SynonymParser::new(SynonymFormat::Simple, expand, true)
        .parse(content)?
        .ok_or_else(|| ExtensionError::parse("no synonym table produced"))
}

fn write_with_mtime(path: &Path, content: &str, mtime: SystemTime) -> Result<()> {
    fs::write(path, content)?;
    File::options().write(true).open(path)?.set_modified(mtime)?;
    Ok(())
}

fn filter_texts(filter: &SynonymFilter, input: &[&str]) -> Result<Vec<String>> {
    let tokens: Vec<Token> = input
        .iter()
        .enumerate()
        .map(|(i, w)| Token::new(*w, i))
        .collect();
    Ok(filter
        .filter(Box::new(tokens.into_iter()))?
        .map(|t| t.text)
        .collect())
}

#[test]
fn expand_group_maps_each_term_to_the_others() -> Result<()> {
    let table = simple("A,B,C", true)?;

    for (term, others) in [("a", ["b", "c"]), ("b", ["a", "c"]), ("c", ["a", "b"])] {
        let entry = table.lookup(&[term]).expect("term has an entry");
        let expected: Vec<Vec<String>> = others.iter().map(|o| words(o)).collect();
        assert_eq!(entry.targets, expected);
    }
    Ok(())
}

#[test]
fn explicit_mapping_is_one_directional() -> Result<()> {
    let table = simple("A,B => C", true)?;

    assert_eq!(table.lookup(&["a"]).map(|e| e.targets.clone()), Some(vec![words("c")]));
    assert_eq!(table.lookup(&["b"]).map(|e| e.targets.clone()), Some(vec![words("c")]));
    assert!(table.lookup(&["c"]).is_none());
    Ok(())
}

#[test]
fn longest_match_consumes_three_tokens() -> Result<()> {
    let table = simple("New York => NY\nNew York City => NYC", true)?;

    let found = table
        .longest_match(&["New", "York", "City", "Hall"])
        .expect("a rule matches");
    assert_eq!(found.len, 3);
    assert_eq!(found.entry.targets, vec![words("nyc")]);
    Ok(())
}

#[test]
fn duplicate_sources_accumulate_targets() -> Result<()> {
    let table = simple("tv => television\ntv => telly\ntv => television", true)?;
    assert_eq!(
        table.lookup(&["tv"]).map(|e| e.targets.clone()),
        Some(vec![words("television"), words("telly")])
    );
    Ok(())
}

#[test]
fn wordnet_with_malformed_lines_keeps_valid_records() -> Result<()> {
    let content = "\
s(100000001,1,'car',n,1,0).
s(100000001,2,'auto',n,1,0).
s(100000001,3,missing quotes,n,1,0).
s(100000001,4,'automobile',n,1,0).
s(oops).
";
    let table = SynonymParser::new(SynonymFormat::Wordnet, true, false)
        .parse(content)?
        .ok_or_else(|| ExtensionError::parse("no synonym table produced"))?;

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.lookup(&["car"]).map(|e| e.targets.clone()),
        Some(vec![words("auto"), words("automobile")])
    );
    Ok(())
}

#[test]
fn unparseable_wordnet_is_absent() -> Result<()> {
    let parsed = SynonymParser::new(SynonymFormat::Wordnet, true, false)
        .parse("car, auto\nnot prolog at all\n")?;
    assert!(parsed.is_none());
    Ok(())
}

#[test]
fn bad_simple_rule_keeps_previous_table() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("synonyms.txt");
    let t0 = SystemTime::now() - Duration::from_secs(3600);
    write_with_mtime(&path, "big, large\n", t0)?;

    let config = SynonymConfig::with_path(&path).reload_interval(Duration::from_millis(5));
    let filter = SynonymFilter::from_config(&config, None)?;
    assert_eq!(filter_texts(&filter, &["big"])?, vec!["big", "large"]);

    write_with_mtime(&path, "big, huge\na => b => c\n", t0 + Duration::from_secs(10))?;
    thread::sleep(Duration::from_millis(20));
    assert_eq!(filter_texts(&filter, &["big"])?, vec!["big", "large"]);

    write_with_mtime(&path, "big, huge\n", t0 + Duration::from_secs(20))?;
    thread::sleep(Duration::from_millis(20));
    assert_eq!(filter_texts(&filter, &["big"])?, vec!["big", "huge"]);
    Ok(())
}

#[test]
fn synonym_file_created_after_startup() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = SynonymConfig::with_path("late.txt").reload_interval(Duration::from_millis(5));
    let filter = SynonymFilter::from_config(&config, Some(dir.path()))?;
    assert_eq!(filter_texts(&filter, &["big"])?, vec!["big"]);

    fs::write(dir.path().join("late.txt"), "big, large\n")?;
    thread::sleep(Duration::from_millis(20));
    assert_eq!(filter_texts(&filter, &["big"])?, vec!["big", "large"]);
    Ok(())
}

#[test]
fn tokenizer_and_filter_share_one_resource() -> Result<()> {
    let resource = Arc::new(ReloadableResource::from_lines(
        vec!["東京, とうきょう".to_string()],
        SynonymParser::new(SynonymFormat::Simple, true, true),
    )?);

    let tokenizer = NGramSynonymTokenizer::new(2, " ", Arc::clone(&resource))?;
    let filter = SynonymFilter::new(Arc::clone(&resource));

    let tokens = filter.filter(tokenizer.tokenize("東京タワー")?)?;
    let texts: Vec<String> = tokens.map(|t| t.text).collect();

    assert_eq!(texts[..2], ["東京", "とうきょう"]);
    assert!(texts.contains(&"タワ".to_string()));
    assert_eq!(resource.reload_count(), 1);
    Ok(())
}

#[test]
fn ngram_tokenizer_reads_wordnet_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("wn.pl"),
        "s(1,1,'ｐｃ',n,1,0).\ns(1,2,'パソコン',n,1,0).\n",
    )?;

    let config: NGramSynonymConfig = serde_json::from_str(
        r#"{"n": 2, "synonyms_path": "wn.pl", "format": "wordnet"}"#,
    )?;
    let tokenizer = NGramSynonymTokenizer::from_config(&config, Some(dir.path()))?;

    let texts: Vec<String> = tokenizer.tokenize("新しいパソコン")?.map(|t| t.text).collect();
    assert_eq!(texts, vec!["新し", "しい", "パソコン", "ｐｃ"]);
    Ok(())
}
