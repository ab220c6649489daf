/*!

This is the long-form manual for `department_tally` and `dtally`.

## Input format

The results file is a text file with one polling record per line. The fields are separated by
semicolons (`;`) and are read as they are: there is no quoting and no trimming of whitespace.
The first line is a header. It is always dropped, whatever it contains.

The position of the columns is fixed (see [`crate::RowLayout::RESULTS_FILE`]):

| index        | content                                      |
|--------------|----------------------------------------------|
| 1            | department code                              |
| 10           | total votes cast for this row                |
| 23, 30, 37.. | first column of each candidate block         |

Each candidate block has 7 columns. The first one is the name of the candidate and the third one
the number of votes for this candidate in this row. The other columns are not read.

```text
h0;h1;...;h22;name;sex;votes;...
x;75;...;100;...;Alice;F;60;...;Bob;M;40;...
```

A row must contain at least the 23 columns before the candidate blocks. The last candidate
block may stop early, as long as it still holds the name and the votes (3 columns). Anything
else stops the tally with an error naming the line.

Counts are signed: `-5` and `+2` are read as numbers. A sum that no longer fits in a 64-bit
counter stops the tally with an error naming the line.

## Unreadable numbers

* The total votes of a row: a warning is logged, and the row counts for zero in the grand total
  and in its department. The tally continues.
* The votes of a candidate: with [`crate::CandidateVotePolicy::DefaultToZero`] (the default) the
  candidate gets zero votes for this row, silently. With
  [`crate::CandidateVotePolicy::FailFast`] the tally stops.

## Output

```text
Total votes: 150
Candidate: Alice Votes: 90
Candidate: Bob Votes: 60
Department: 75 Candidate: Alice Votes: 90
Department: 75 Candidate: Bob Votes: 60
# 1 : 75
```

Candidates and departments are listed in the order in which they first appear in the file. The
ranking sorts the departments by decreasing total votes; departments with the same total keep
the order of the file.

*/
