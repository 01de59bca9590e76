/*!

This is the long-form manual for `mpi_index` and `mpidash`.

## Input formats

Two tables are read, each from a CSV file (`csv` provider) or from an Excel
workbook (`xlsx` provider, first worksheet unless a name is given). The first
row holds the column names.

### MPI table

| Country Name | Year | MPI  |
|--------------|------|------|
| Chad         | 2020 | 0.52 |
| ...          |      |      |

A row with an empty `MPI` cell is skipped with a warning.

### Detailed table

| Country Name | Year | indicator 1 | indicator 2 | ... |
|--------------|------|-------------|-------------|-----|
| Chad         | 2020 | 0.31        |             |     |

Every column other than `Country Name` and `Year` is an indicator, in file
order. Empty cells are allowed. The rows are joined to the MPI table by
(`Country Name`, `Year`): a row without a matching MPI row is dropped and
reported.

### Boundaries

A GeoJSON `FeatureCollection`. Each feature has its name under
`properties.name` and a `Polygon` or `MultiPolygon` geometry. The names must
match the `Country Name` column exactly; regions without data are drawn in
the "no data" color.

## Views

* **Map**: the MPI of the selected year. The color scale is computed on the
square root of the MPI and split in 5 buckets of equal width. The legend
shows the raw MPI range and the edges of each bucket in MPI units.
* **MPI**: the sum of the MPI of the selected country for the year, after
removing duplicated rows, rounded to an integer (halves to even).
* **Country Rank**: the position of the country when the year is sorted by
decreasing MPI, over the number of rows of the year. Rendering fails if the
country has no row for the year.
* **Chart**: one indicator of the country across the years, against the
median of all the countries for each year.

## Selection

The year defaults to the most recent one. The country is the clicked region
if it has data, else the requested country, else the first country in
alphabetical order. The indicator defaults to the first one.

## Configuration file

```json
{
  "outputSettings": { "title": "Multi-Dimensional Poverty Index", "subtitle": "...", "outputDirectory": "out" },
  "dataSources": {
    "mpi": { "provider": "csv", "filePath": "MPI Data.csv" },
    "detailed": { "provider": "xlsx", "filePath": "Detailed MPI Data.xlsx", "worksheetName": "Sheet1" },
    "boundaries": "world-map-boundaries.geojson"
  },
  "excludedYears": [2023],
  "map": { "colors": ["#ffffcc", "#c2e699", "#78c679", "#31a354", "#006837"], "noDataColor": "black" }
}
```

Relative paths are resolved against the directory of the configuration file.

*/
