use clap::Parser;

/// Order lifting and social ranking: lifts orders over individuals to coalitions, ranks them back,
/// and measures how well the rankings recover the orders from partial information.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON description of an experiment. See the manual of the
    /// social_ranking library for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, socrank will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) Where the summary is written in JSON format. Defaults to the
    /// standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A preorder over coalitions in JSON format, to be ranked with the rules
    /// given by --ranking.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (comma-separated identifiers) A strict order over individuals, best first. The population is
    /// made of the listed individuals.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub order: Option<Vec<u32>>,

    /// (name or identifier, default leximin) The lifting rule applied to --order.
    #[clap(long, value_parser)]
    pub lifting: Option<String>,

    /// (comma-separated names or empty) The ranking rules to apply. All the rules are applied
    /// if not specified.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub ranking: Option<Vec<String>>,

    /// If passed as an argument, cardinality-based lifting rules prefer smaller coalitions.
    #[clap(long, takes_value = false)]
    pub prefer_smaller: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
