/*!

This is the long-form manual for `social_ranking` and `socrank`.

## Vocabulary

A *population* is a finite set of individuals, identified by positive integers.
A *coalition* is any subset of the population, the empty one included.
A *preorder* is a list of equivalence classes, the most preferred class first.

*Order lifting* extends a strict order over the individuals to a preorder over
the coalitions. *Social ranking* goes the other way: from a (possibly partial)
preorder over coalitions, it ranks the individuals.

## Lifting rules

Each rule has a name and a numeric identifier; both are accepted by the
command line and by the configuration files.

| id | name                           | empty coalition |
|----|--------------------------------|-----------------|
| 1  | `minmax`                       | no              |
| 2  | `maxmin`                       | no              |
| 3  | `leximin`                      | yes             |
| 4  | `leximax`                      | yes             |
| 5  | `borda` (or `bordasum`)        | yes             |
| 6  | `indirect_utility`             | no              |
| 7  | `cardinality`                  | no              |
| 8  | `indirect_utility_cardinality` | no              |
| 9  | `cardinality_indirect_utility` | no              |

The cardinality-based rules prefer larger coalitions by default. This is
controlled by [`crate::LiftingConfig`].

## Ranking rules

* `lexcel` lexicographic excellence. Always a preorder.
* `cp_majority` ceteris paribus majority. A pairwise relation that may contain
  ties (both directions) and cycles. It is turned into a preorder with the
  dominance counts when a preorder is needed.
* `ordinal_banzhaf` ordinal Banzhaf score. Always a preorder.

Coalitions missing from a partial preorder are skipped by the comparisons of
`cp_majority` and `ordinal_banzhaf`.

## Command line

### One-shot mode

```bash
socrank --order 3,1,2 --lifting minmax --ranking lexcel
```

Lifts the order `3 > 1 > 2` over the population `{1, 2, 3}` and ranks it back.
The output is a JSON document with the lifted preorder and the ranking.

```bash
socrank --input coalitions.json --ranking cp_majority
```

Ranks a preorder read from a file:

```json
{
  "population": [1, 2, 3],
  "classes": [
    [[1, 2], [3]],
    [[1, 3]],
    [[1], [2, 3]],
    [[2]]
  ]
}
```

Each class is a list of coalitions, each coalition the list of its members.
An empty list is the empty coalition.

### Experiments

```bash
socrank --config experiment.json --out results.json
```

Runs repeated trials measuring how well each ranking rule recovers a random
strict order from a partial view of its lifting. All the fields are optional:

```json
{
  "populationSizes": [3, 4, 5],
  "liftingRules": ["minmax", "leximin", 5],
  "trials": 100,
  "seed": 42,
  "keptFractions": [1.0, 0.75, 0.5],
  "coalitionSize": null,
  "sizePreference": "larger"
}
```

* `keptFractions` the share of the lifted preorder that is kept. Two random
  singletons are always removed first when the fraction is below 1, then
  random coalitions until the target is reached.
* `coalitionSize` if set, only the coalitions of this size are kept. Random
  classes are then dropped until there are at most `keptFractions` times the
  number of coalitions of that size. Rules with large classes may keep all.
* `seed` makes the experiment reproducible: each trial draws from a generator
  seeded with a SHA-256 hash of the seed, the trial and the setting.

For every population size, lifting rule and kept fraction, the summary reports
per ranking method (`lexcel`, `cp_majority`, `ordinal_banzhaf`,
`cp_majority_corrected`): the number of exact recoveries, the number of trials
where the best individual is alone at the top, and the average Kendall-Tau
distance and inversion count.

### Reference check

`--reference summary.json` compares the computed summary with a stored one.
The differences are printed and the program exits with an error.

### Logging

Logging follows `RUST_LOG` (default `info`). `--verbose` turns on the debug
messages of all the procedures.

*/
