use std::{fmt, path::Path, error::Error};
use regex::Regex;
use yaml_rust::{Yaml, YamlLoader};
use crate::{
    Label, Alphabet, ContentSpec, BraceletGenerator, Bounds, ThicknessTable,
    BlockCondition, Interface, InterfaceCount, Orientation, FilterSpec, IsomerFilter, IsomerError,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum JobScriptError {
    Empty,
    Multiple,
    NotADict,
    KeyNotString,
    NameNotString,
    NameDup,
    CompositionMissing,
    CompositionInvalid,
    CompositionDup,
    CountInvalid,
    NameUnknown(String),
    ThicknessInvalid,
    BoundsInvalid(String),
    BlockInvalid,
    InterfaceInvalid(String),
    InterfaceList,
    DirectedNotBool,
    FilterInvalid,
    FilterKeyUnknown(String),
}

impl fmt::Display for JobScriptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use JobScriptError::*;

        match self {
            Empty => write!(f, "YAML job description is empty"),
            Multiple => write!(f, "Multiple YAML job descriptions"),
            NotADict => write!(f, "Bad YAML job description (not a dictionary)"),
            KeyNotString => write!(f, "Non-string key in YAML job description"),
            NameNotString => write!(f, "Non-string job name in YAML job description"),
            NameDup => write!(f, "Duplicated job name in YAML job description"),
            CompositionMissing => write!(f, "Missing composition in YAML job description"),
            CompositionInvalid => {
                write!(f, "Composition should be a dictionary of layer counts or a list of layer counts")
            }
            CompositionDup => write!(f, "Duplicated composition in YAML job description"),
            CountInvalid => write!(f, "Invalid layer count in YAML job description"),
            NameUnknown(name) => write!(f, "Component \"{}\" isn't part of the composition", name),
            ThicknessInvalid => write!(f, "Invalid thickness table in YAML job description"),
            BoundsInvalid(bounds) => write!(f, "Invalid bounds \"{}\"", bounds),
            BlockInvalid => write!(f, "Invalid block condition in YAML job description"),
            InterfaceInvalid(interface) => write!(f, "Invalid interface \"{}\"", interface),
            InterfaceList => write!(f, "Interfaces should be given as a string or a list of strings"),
            DirectedNotBool => write!(f, "Interface directedness should be \"true\" or \"false\""),
            FilterInvalid => write!(f, "Invalid filter in YAML job description"),
            FilterKeyUnknown(key) => write!(f, "Unknown filter key \"{}\"", key),
        }
    }
}

impl Error for JobScriptError {}

fn parse_count(yaml: &Yaml) -> Result<usize, Box<dyn Error>> {
    match yaml {
        Yaml::Integer(count) if *count >= 0 => Ok(*count as usize),
        _ => Err(Box::new(JobScriptError::CountInvalid)),
    }
}

fn parse_name(yaml: &Yaml) -> Result<&str, Box<dyn Error>> {
    yaml.as_str().map(|s| s.trim()).ok_or_else(|| Box::new(JobScriptError::KeyNotString) as Box<dyn Error>)
}

fn parse_bounds_str(bounds: &str) -> Result<Bounds, Box<dyn Error>> {
    lazy_static! {
        // Either "n", or "min..max" with any of the two limits omitted.
        static ref EXACT_RE: Regex = Regex::new(r"^\s*(\d+)\s*$").unwrap();
        static ref RANGE_RE: Regex = Regex::new(r"^\s*(\d*)\s*\.\.\s*(\d*)\s*$").unwrap();
    }

    if let Some(cap) = EXACT_RE.captures(bounds) {
        Ok(Bounds::exactly(cap[1].parse()?))
    } else if let Some(cap) = RANGE_RE.captures(bounds) {
        let min = if cap[1].is_empty() { 0 } else { cap[1].parse()? };
        let max = if cap[2].is_empty() { None } else { Some(cap[2].parse()?) };

        Ok(Bounds::new(min, max)?)
    } else {
        Err(Box::new(JobScriptError::BoundsInvalid(bounds.to_owned())))
    }
}

/// Accepts an integer (exact value), a `[min, max]` pair, where
/// `max == 0` leaves the upper limit open, or a `"min..max"` string.
fn parse_bounds(yaml: &Yaml) -> Result<Bounds, Box<dyn Error>> {
    match yaml {
        Yaml::Integer(_) => Ok(Bounds::exactly(parse_count(yaml)?)),
        Yaml::String(bounds) => parse_bounds_str(bounds),
        Yaml::Array(pair) if pair.len() == 2 => {
            let min = parse_count(&pair[0])?;
            let max = parse_count(&pair[1])?;

            if max == 0 {
                Ok(Bounds::at_least(min))
            } else {
                Ok(Bounds::new(min, Some(max))?)
            }
        }
        _ => Err(Box::new(JobScriptError::BoundsInvalid(format!("{:?}", yaml)))),
    }
}

fn parse_block_condition(yaml: &Yaml) -> Result<BlockCondition, Box<dyn Error>> {
    match yaml {
        Yaml::Integer(_) => Ok(BlockCondition::Includes(parse_count(yaml)?)),
        Yaml::String(_) | Yaml::Array(_) => Ok(BlockCondition::Within(parse_bounds(yaml)?)),
        _ => Err(Box::new(JobScriptError::BlockInvalid)),
    }
}

/// Parses a sequence of component names separated with `-`.
fn parse_pattern(alphabet: &Alphabet, description: &str) -> Result<Vec<Label>, Box<dyn Error>> {
    description
        .split('-')
        .map(|name| {
            if name.trim().is_empty() {
                Err(Box::new(JobScriptError::InterfaceInvalid(description.to_owned())) as Box<dyn Error>)
            } else {
                label_of(alphabet, name)
            }
        })
        .collect()
}

/// Parses a pair of component names, e.g. `"VSe2-SnSe"`.
pub(crate) fn parse_interface(alphabet: &Alphabet, description: &str) -> Result<Interface, Box<dyn Error>> {
    let pattern = parse_pattern(alphabet, description)?;

    if pattern.len() == 2 {
        Ok(Interface::new(pattern[0], pattern[1]))
    } else {
        Err(Box::new(JobScriptError::InterfaceInvalid(description.to_owned())))
    }
}

fn label_of(alphabet: &Alphabet, name: &str) -> Result<Label, Box<dyn Error>> {
    alphabet
        .get_label(name)
        .ok_or_else(|| Box::new(JobScriptError::NameUnknown(name.trim().to_owned())) as Box<dyn Error>)
}

fn as_dict(yaml: &Yaml, err: JobScriptError) -> Result<&yaml_rust::yaml::Hash, Box<dyn Error>> {
    match yaml {
        Yaml::Hash(dict) => Ok(dict),
        _ => Err(Box::new(err)),
    }
}

/// A listing job: the composition of the repeating unit, the
/// thickness of its components, and the criteria isomers should
/// meet.
///
/// Jobs are read from YAML dictionaries with a mandatory
/// `composition` entry and optional `name`, `thickness` and `filter`
/// entries.  Other entries are ignored.
#[derive(Clone, Debug)]
pub struct Job {
    name:      Option<String>,
    content:   ContentSpec,
    thickness: ThicknessTable,
    filter:    FilterSpec,
}

impl Job {
    /// Creates a job with no thickness data and an empty filter.
    pub fn new(content: ContentSpec) -> Self {
        Job { name: None, content, thickness: ThicknessTable::new(), filter: FilterSpec::new() }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    pub fn from_str<S: AsRef<str>>(script: S) -> Result<Self, Box<dyn Error>> {
        let docs = YamlLoader::load_from_str(script.as_ref())?;

        if docs.is_empty() {
            Err(Box::new(JobScriptError::Empty))
        } else if docs.len() == 1 {
            Self::from_yaml(&docs[0])
        } else {
            Err(Box::new(JobScriptError::Multiple))
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let script = std::fs::read_to_string(path)?;

        debug!("Loading job from \"{}\"", path.display());

        let mut job = Self::from_str(script)?;

        if job.name.is_none() {
            job.name = path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_owned());
        }

        Ok(job)
    }

    fn from_yaml(yaml: &Yaml) -> Result<Self, Box<dyn Error>> {
        let dict = as_dict(yaml, JobScriptError::NotADict)?;

        let mut name = None;
        let mut composition = None;
        let mut thickness = None;
        let mut filter = None;

        for (key, value) in dict {
            let key = key.as_str().ok_or(JobScriptError::KeyNotString)?.trim();

            match key {
                "name" => {
                    if name.is_some() {
                        return Err(Box::new(JobScriptError::NameDup))
                    }
                    name = Some(value.as_str().ok_or(JobScriptError::NameNotString)?.trim().to_owned());
                }
                "composition" => {
                    if composition.is_some() {
                        return Err(Box::new(JobScriptError::CompositionDup))
                    }
                    composition = Some(value);
                }
                "thickness" => thickness = Some(value),
                "filter" => filter = Some(value),
                _ => trace!("Ignoring \"{}\" entry of job description", key),
            }
        }

        let content = Self::parse_composition(composition.ok_or(JobScriptError::CompositionMissing)?)?;
        let alphabet = content.get_alphabet();

        let thickness = match thickness {
            Some(yaml) => Self::parse_thickness(alphabet, yaml)?,
            None => ThicknessTable::new(),
        };

        let filter = match filter {
            Some(yaml) => Self::parse_filter(alphabet, yaml)?,
            None => FilterSpec::new(),
        };

        debug!(
            "Job {} with composition {}",
            name.as_ref().map(|n| format!("\"{}\"", n)).unwrap_or_else(|| "<anonymous>".to_owned()),
            alphabet.with(&content),
        );
        trace!("{:?}", filter);

        Ok(Job { name, content, thickness, filter })
    }

    fn parse_composition(yaml: &Yaml) -> Result<ContentSpec, Box<dyn Error>> {
        match yaml {
            Yaml::Hash(dict) => {
                let mut names = Vec::with_capacity(dict.len());
                let mut counts = Vec::with_capacity(dict.len());

                for (key, value) in dict {
                    names.push(parse_name(key)?);
                    counts.push(parse_count(value)?);
                }

                let alphabet = Alphabet::from_names(names)?;

                Ok(ContentSpec::new(&alphabet, alphabet.labels().zip(counts))?)
            }
            Yaml::Array(list) => {
                let counts: Result<Vec<_>, _> = list.iter().map(parse_count).collect();

                Ok(ContentSpec::from_counts(&counts?)?)
            }
            _ => Err(Box::new(JobScriptError::CompositionInvalid)),
        }
    }

    fn parse_thickness(alphabet: &Alphabet, yaml: &Yaml) -> Result<ThicknessTable, Box<dyn Error>> {
        let dict = as_dict(yaml, JobScriptError::ThicknessInvalid)?;
        let mut table = ThicknessTable::new();

        for (key, value) in dict {
            let label = label_of(alphabet, parse_name(key)?)?;
            let thickness = parse_count(value).map_err(|_| JobScriptError::ThicknessInvalid)?;

            table.insert(label, thickness)?;
        }

        Ok(table)
    }

    fn parse_filter(alphabet: &Alphabet, yaml: &Yaml) -> Result<FilterSpec, Box<dyn Error>> {
        let dict = as_dict(yaml, JobScriptError::FilterInvalid)?;
        let mut spec = FilterSpec::new();

        for (key, value) in dict {
            match parse_name(key)? {
                "thickness" => {
                    for (key, value) in as_dict(value, JobScriptError::FilterInvalid)? {
                        let bounds = parse_bounds(value)?;

                        spec = match parse_name(key)? {
                            "*" => spec.with_thickness_bounds(bounds),
                            name => spec.with_label_thickness(label_of(alphabet, name)?, bounds),
                        };
                    }
                }
                "blocks" => {
                    for (key, value) in as_dict(value, JobScriptError::FilterInvalid)? {
                        let label = label_of(alphabet, parse_name(key)?)?;

                        spec = spec.with_block_condition(label, parse_block_condition(value)?);
                    }
                }
                "interfaces" => spec = Self::parse_interfaces(alphabet, value, spec)?,
                other => return Err(Box::new(JobScriptError::FilterKeyUnknown(other.to_owned()))),
            }
        }

        Ok(spec)
    }

    fn parse_interfaces(alphabet: &Alphabet, yaml: &Yaml, mut spec: FilterSpec) -> Result<FilterSpec, Box<dyn Error>> {
        let dict = as_dict(yaml, JobScriptError::FilterInvalid)?;

        for (key, value) in dict {
            match parse_name(key)? {
                "directed" => {
                    let is_directed = value.as_bool().ok_or(JobScriptError::DirectedNotBool)?;

                    spec = spec.with_orientation(if is_directed {
                        Orientation::Directed
                    } else {
                        Orientation::Symmetric
                    });
                }
                "require" => {
                    for interface in Self::parse_interface_list(alphabet, value)? {
                        spec = spec.require(interface);
                    }
                }
                "forbid" => {
                    for interface in Self::parse_interface_list(alphabet, value)? {
                        spec = spec.forbid(interface);
                    }
                }
                "count" => {
                    for (key, value) in as_dict(value, JobScriptError::FilterInvalid)? {
                        let pattern = parse_pattern(alphabet, parse_name(key)?)?;

                        spec = spec.with_interface_count(InterfaceCount::new(pattern, parse_bounds(value)?)?);
                    }
                }
                other => return Err(Box::new(JobScriptError::FilterKeyUnknown(other.to_owned()))),
            }
        }

        Ok(spec)
    }

    fn parse_interface_list(alphabet: &Alphabet, yaml: &Yaml) -> Result<Vec<Interface>, Box<dyn Error>> {
        let descriptions: Vec<&str> = match yaml {
            Yaml::String(description) => vec![description.as_str()],
            Yaml::Array(list) => {
                list.iter().map(|v| v.as_str().ok_or(JobScriptError::InterfaceList)).collect::<Result<Vec<_>, _>>()?
            }
            _ => return Err(Box::new(JobScriptError::InterfaceList)),
        };

        descriptions.into_iter().map(|description| parse_interface(alphabet, description)).collect()
    }

    #[inline]
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn get_content(&self) -> &ContentSpec {
        &self.content
    }

    #[inline]
    pub fn get_alphabet(&self) -> &Alphabet {
        self.content.get_alphabet()
    }

    #[inline]
    pub fn get_thickness(&self) -> &ThicknessTable {
        &self.thickness
    }

    #[inline]
    pub fn get_filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn generator(&self) -> BraceletGenerator {
        BraceletGenerator::new(&self.content)
    }

    /// Validates the job's filter against its composition.
    pub fn isomer_filter(&self) -> Result<IsomerFilter, IsomerError> {
        IsomerFilter::new(&self.content, self.thickness.clone(), self.filter.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bracelet, IsomerErrorKind};

    fn script_error(script: &str) -> JobScriptError {
        let err = Job::from_str(script).unwrap_err();
        err.downcast_ref::<JobScriptError>().cloned().unwrap()
    }

    fn isomer_error(script: &str) -> IsomerErrorKind {
        let err = Job::from_str(script).unwrap_err();
        err.downcast_ref::<IsomerError>().map(|e| e.kind().clone()).unwrap()
    }

    fn selected(job: &Job) -> Vec<Bracelet> {
        let filter = job.isomer_filter().unwrap();
        let mut result = filter.select_all(&job.generator()).unwrap();
        result.sort();
        result
    }

    #[test]
    fn test_bounds_syntax() {
        assert_eq!(parse_bounds_str("3").unwrap(), Bounds::exactly(3));
        assert_eq!(parse_bounds_str("1..3").unwrap(), Bounds::new(1, Some(3)).unwrap());
        assert_eq!(parse_bounds_str(" 2 .. ").unwrap(), Bounds::at_least(2));
        assert_eq!(parse_bounds_str("..4").unwrap(), Bounds::at_most(4));
        assert!(parse_bounds_str("4..2").is_err());
        assert!(parse_bounds_str("two").is_err());

        assert_eq!(parse_bounds(&Yaml::Integer(5)).unwrap(), Bounds::exactly(5));
        let pair = Yaml::Array(vec![Yaml::Integer(2), Yaml::Integer(0)]);
        assert_eq!(parse_bounds(&pair).unwrap(), Bounds::at_least(2));
        assert!(parse_bounds(&Yaml::Integer(-1)).is_err());
    }

    #[test]
    fn test_composition() {
        let job = Job::from_str("composition: {VSe2: 3, SnSe: 4, SnSe2: 5}").unwrap();
        let alphabet = job.get_alphabet();
        assert_eq!(alphabet.with(job.get_content()).to_string(), "(VSe2)3(SnSe)4(SnSe2)5");
        assert_eq!(job.get_name(), None);
        assert!(job.get_filter().is_empty());

        let job = Job::from_str("name: simple\ncomposition: [2, 2, 2]").unwrap();
        assert_eq!(job.get_name(), Some("simple"));
        assert_eq!(job.get_content().counts().collect::<Vec<_>>(), vec![2, 2, 2]);
        assert_eq!(job.generator().count(), 11);
    }

    #[test]
    fn test_script_errors() {
        assert_eq!(script_error(""), JobScriptError::Empty);
        assert_eq!(script_error("composition: [1]\n---\ncomposition: [2]"), JobScriptError::Multiple);
        assert_eq!(script_error("- 1\n- 2"), JobScriptError::NotADict);
        assert_eq!(script_error("name: x"), JobScriptError::CompositionMissing);
        assert_eq!(script_error("composition: 3"), JobScriptError::CompositionInvalid);
        assert_eq!(script_error("composition: [2, -1]"), JobScriptError::CountInvalid);
        assert_eq!(
            script_error("composition: [2, 2]\nfilter: {blocks: {C: 1}}"),
            JobScriptError::NameUnknown("C".to_owned())
        );
        assert_eq!(
            script_error("composition: [2, 2]\nfilter: {interfaces: {forbid: [A-B-A]}}"),
            JobScriptError::InterfaceInvalid("A-B-A".to_owned())
        );
        assert_eq!(
            script_error("composition: [2, 2]\nfilter: {interfaces: {directed: 1}}"),
            JobScriptError::DirectedNotBool
        );
        assert_eq!(
            script_error("composition: [2, 2]\nfilter: {colors: 3}"),
            JobScriptError::FilterKeyUnknown("colors".to_owned())
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(isomer_error("composition: [2, 0]"), IsomerErrorKind::ContentZeroCount(Label::new(1).unwrap()));
        assert_eq!(
            isomer_error("composition: {A: 1, ' A': 2}"),
            IsomerErrorKind::AlphabetNameDup("A".to_owned())
        );
        assert_eq!(isomer_error("composition: [2, 2]\nthickness: {A: 0}"), IsomerErrorKind::ThicknessZero(Label::new(0).unwrap()));
        assert_eq!(
            isomer_error("composition: [2, 2]\nfilter: {thickness: {A: [3, 1]}}"),
            IsomerErrorKind::BoundsInverted(3, 1)
        );
        assert_eq!(
            isomer_error("composition: [2, 2]\nfilter: {interfaces: {count: {A: 1}}}"),
            IsomerErrorKind::PatternTooShort(1)
        );
    }

    #[test]
    fn test_block_selection() {
        let script = "
name: vse2-snse
composition:
  VSe2: 3
  SnSe: 4
  SnSe2: 5
filter:
  blocks:
    SnSe: 2..2
    SnSe2: 5
";
        let job = Job::from_str(script).unwrap();
        let alphabet = job.get_alphabet();
        let isomers: Vec<_> = selected(&job).iter().map(|b| alphabet.with(b).to_string()).collect();

        assert_eq!(
            isomers,
            vec![
                "(VSe2)3-(SnSe)2-(SnSe2)5-(SnSe)2",
                "(VSe2)2-(SnSe)2-(VSe2)1-(SnSe)2-(SnSe2)5",
                "(VSe2)2-(SnSe)2-(VSe2)1-(SnSe2)5-(SnSe)2",
                "(VSe2)1-(SnSe)2-(VSe2)1-(SnSe)2-(VSe2)1-(SnSe2)5",
            ]
        );
    }

    #[test]
    fn test_interface_selection() {
        let script = "
composition: {VSe2: 3, SnSe: 4, SnSe2: 5}
filter:
  interfaces:
    forbid: VSe2-SnSe
";
        assert_eq!(selected(&Job::from_str(script).unwrap()).len(), 55);

        let script = "
composition: {VSe2: 3, SnSe: 4, SnSe2: 5}
filter:
  interfaces:
    count:
      VSe2 - SnSe: 4..5
";
        assert_eq!(selected(&Job::from_str(script).unwrap()).len(), 126);

        let script = "
composition: [2, 2, 2]
filter:
  interfaces:
    directed: true
    require: [A-C]
";
        let job = Job::from_str(script).unwrap();
        assert_eq!(job.get_filter().get_orientation(), Orientation::Directed);
        assert_eq!(selected(&job).len(), 6);
    }

    #[test]
    fn test_thickness_selection() {
        let script = "
composition: {PbSe: 1, MoSe2: 2, TiSe2: 3}
thickness: {PbSe: 6, MoSe2: 7, TiSe2: 6}
filter:
  thickness:
    '*': [6, 0]
    MoSe2: ..6
";
        let job = Job::from_str(script).unwrap();
        assert_eq!(job.get_thickness().get(Label::new(1).unwrap()), Some(7));
        assert!(selected(&job).is_empty());

        let script = "
composition: {PbSe: 1, MoSe2: 2, TiSe2: 3}
thickness: {PbSe: 6}
filter: {thickness: {'*': 1..}}
";
        let job = Job::from_str(script).unwrap();
        let err = job.isomer_filter().unwrap_err();
        assert!(err.is_lookup_missing());
    }
}
